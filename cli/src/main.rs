mod commands;
mod terminal;

use anyhow::Context;
use commands::{CommandLine, Commands, classify, diff, probes, stats};
use terminal::{logging, print};
use wildsift_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.debug);

    let mut cfg = match &commands.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    cfg.no_banner |= commands.no_banner;
    cfg.quiet = cfg.quiet.max(commands.quiet);

    print::set_quiet(cfg.quiet);

    match commands.command {
        Commands::Classify(args) => {
            print::banner(cfg.no_banner);
            print::header("classifying assets");
            classify::classify(args, &cfg).await
        }
        Commands::Probes {
            domains,
            samples,
            output,
        } => probes::probes(&domains, samples, output.as_deref()),
        Commands::Diff {
            old,
            new,
            output,
            verbose,
        } => {
            print::banner(cfg.no_banner);
            diff::diff(&old, &new, output.as_deref(), verbose)
        }
        Commands::Stats { outdir } => {
            print::banner(cfg.no_banner);
            stats::stats(&outdir)
        }
    }
}
