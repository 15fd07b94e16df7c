pub mod classify;
pub mod diff;
pub mod probes;
pub mod stats;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use wildsift_common::config::MatchConfig;
use wildsift_core::engine::RunInputs;

#[derive(Parser)]
#[command(name = "wildsift")]
#[command(about = "Separates real hosts from wildcard DNS noise in recon output.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Hide the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Print less; repeat to print even less
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug logs
    #[arg(long, global = true)]
    pub debug: bool,

    /// TOML file with defaults for the options below
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify live hosts as real, wildcard or needing review
    #[command(alias = "c")]
    Classify(ClassifyArgs),
    /// Print random hostnames under each root for wildcard probing
    #[command(alias = "p")]
    Probes {
        /// Root domain allowlist
        domains: PathBuf,
        /// Probe names per root
        samples: usize,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two recon run directories
    #[command(alias = "d")]
    Diff {
        /// Older run directory
        #[arg(long)]
        old: PathBuf,
        /// Newer run directory
        #[arg(long)]
        new: PathBuf,
        /// Directory to save the diff lists into
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// List the individual differences
        #[arg(short, long)]
        verbose: bool,
    },
    /// Count what each stage of a recon run produced and save stats.json
    #[command(alias = "s")]
    Stats {
        /// Run directory to summarize
        #[arg(long)]
        outdir: PathBuf,
    },
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Root domain allowlist
    #[arg(long)]
    pub domains: PathBuf,
    /// DNS A records of real hosts (JSONL)
    #[arg(long)]
    pub dns_a: Option<PathBuf>,
    /// DNS AAAA records of real hosts (JSONL)
    #[arg(long)]
    pub dns_aaaa: Option<PathBuf>,
    /// DNS A records of wildcard probe names (JSONL)
    #[arg(long)]
    pub wild_dns_a: Option<PathBuf>,
    /// DNS AAAA records of wildcard probe names (JSONL)
    #[arg(long)]
    pub wild_dns_aaaa: Option<PathBuf>,
    /// HTTP probe results of real hosts (JSONL)
    #[arg(long)]
    pub httpx: Option<PathBuf>,
    /// HTTP probe results of wildcard probe names (JSONL)
    #[arg(long)]
    pub wild_httpx: Option<PathBuf>,
    /// Directory the result files are written to
    #[arg(long)]
    pub outdir: PathBuf,
    /// Highest simhash Hamming distance counted as a strong HTTP match
    #[arg(long)]
    pub simhash_max_dist: Option<u32>,
    /// Relative tolerance in percent for content lengths to count as close
    #[arg(long)]
    pub content_length_tol_pct: Option<f64>,
}

impl ClassifyArgs {
    pub fn inputs(&self) -> RunInputs {
        RunInputs {
            domains: self.domains.clone(),
            dns_a: self.dns_a.clone(),
            dns_aaaa: self.dns_aaaa.clone(),
            wild_dns_a: self.wild_dns_a.clone(),
            wild_dns_aaaa: self.wild_dns_aaaa.clone(),
            wild_httpx: self.wild_httpx.clone(),
            httpx: self.httpx.clone(),
        }
    }

    /// Flags given on the command line override the configured values.
    pub fn match_config(&self, base: &MatchConfig) -> MatchConfig {
        MatchConfig {
            simhash_max_distance: self.simhash_max_dist.unwrap_or(base.simhash_max_distance),
            content_length_tolerance_pct: self
                .content_length_tol_pct
                .unwrap_or(base.content_length_tolerance_pct),
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
