use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::Instrument;

use crate::commands::ClassifyArgs;
use crate::mprint;
use crate::terminal::{print, spinner};
use wildsift_common::config::Config;
use wildsift_core::engine::{self, RootFingerprint, RunOutcome};
use wildsift_core::output::{self, WrittenOutputs};

pub async fn classify(args: ClassifyArgs, cfg: &Config) -> anyhow::Result<()> {
    let matching = args.match_config(&cfg.matching);
    let inputs = args.inputs();

    let start_time: Instant = Instant::now();
    let outcome: RunOutcome = engine::run(&inputs, &matching)
        .instrument(spinner::classification_span())
        .await
        .context("classification aborted")?;

    let written: WrittenOutputs = output::write_outputs(&args.outdir, &outcome)
        .await
        .with_context(|| format!("writing results to {}", args.outdir.display()))?;

    classification_ends(&outcome, &written, start_time.elapsed(), cfg);
    Ok(())
}

fn classification_ends(
    outcome: &RunOutcome,
    written: &WrittenOutputs,
    total_time: Duration,
    cfg: &Config,
) {
    if outcome.classification.rows.is_empty() {
        print::header("zero assets classified");
        print::no_results("HTTP records were classified");
    }

    if cfg.quiet == 0 {
        print_fingerprints(&outcome.fingerprints);
    }

    print::header("results");
    print_outputs(written);

    let summary: String = print::decision_summary(&outcome.summary.decisions, total_time.as_secs_f64());
    print::closing_line(&summary);
}

fn print_fingerprints(fingerprints: &[RootFingerprint]) {
    let wildcard_roots: Vec<&RootFingerprint> = fingerprints
        .iter()
        .filter(|fp| !fp.wildcard_ips.is_empty() || fp.http.is_some())
        .collect();

    print::header("wildcard roots");
    if wildcard_roots.is_empty() {
        print::print_status("No root answered its wildcard probes");
        return;
    }

    for (idx, fp) in wildcard_roots.iter().enumerate() {
        print::fingerprint_tree(idx, fp.root.as_str(), &fp.wildcard_ips, fp.http.as_ref());
        if idx + 1 != wildcard_roots.len() {
            mprint!();
        }
    }
}

fn print_outputs(written: &WrittenOutputs) {
    let rows: [(&str, &Path); 4] = [
        ("Final", written.final_urls.as_path()),
        ("Review", written.review_urls.as_path()),
        ("Audit", written.audit.as_path()),
        ("Summary", written.summary.as_path()),
    ];
    print::set_key_width(&rows.map(|(key, _)| key));
    for (key, path) in rows {
        print::path_line(key, path);
    }
}
