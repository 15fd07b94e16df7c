use std::collections::BTreeSet;
use std::path::Path;

use colored::*;
use tracing::info;

use crate::mprint;
use crate::terminal::{colors, print};
use wildsift_core::diff::{RunDiff, SetDelta};

const NEW_SUBDOMAINS_SHOWN: usize = 50;
const NEW_URLS_SHOWN: usize = 50;
const DEAD_URLS_SHOWN: usize = 30;

pub fn diff(old: &Path, new: &Path, output: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let run_diff = RunDiff::between(old, new)?;

    print::header("recon run comparison");
    print::set_key_width(&["Old", "New"]);
    print::path_line("Old", &run_diff.old_dir);
    print::path_line("New", &run_diff.new_dir);

    print_delta("Subdomains", &run_diff.subdomains, ("New subdomains", "Removed subdomains"));
    print_delta("Resolved hosts", &run_diff.resolved, ("Newly resolved", "No longer resolved"));
    print_delta("Live HTTP", &run_diff.live_urls, ("New live URLs", "Dead URLs"));
    if !run_diff.open_ports.is_empty() {
        print_delta("Open ports", &run_diff.open_ports, ("New open ports", "Closed ports"));
    }

    if verbose {
        list_entries("new subdomains", "+", &run_diff.subdomains.added, NEW_SUBDOMAINS_SHOWN);
        list_entries("new live urls", "+", &run_diff.live_urls.added, NEW_URLS_SHOWN);
        list_entries("dead urls", "-", &run_diff.live_urls.removed, DEAD_URLS_SHOWN);
    }

    if let Some(dir) = output {
        let written = run_diff.write_to(dir)?;
        info!("Saved {} diff files to {}", written.len(), dir.display());
    }

    let added: usize = run_diff.subdomains.added.len();
    let gone: usize = run_diff.live_urls.removed.len();
    print::closing_line(&format!(
        "{} new subdomains, {} new live URLs, {} dead URLs",
        format!("+{added}").color(colors::KEEP),
        format!("+{}", run_diff.live_urls.added.len()).color(colors::KEEP),
        format!("-{gone}").color(colors::EXCLUDED)
    ));
    Ok(())
}

fn print_delta(title: &str, delta: &SetDelta, (added_label, removed_label): (&str, &str)) {
    mprint!();
    print::tree_head(0, title);
    print::tree(&print::count_details(&[
        ("Old", delta.old_count.to_string(), colors::TEXT_DEFAULT),
        ("New", delta.new_count.to_string(), colors::TEXT_DEFAULT),
        (added_label, format!("+{}", delta.added.len()), colors::KEEP),
        (removed_label, format!("-{}", delta.removed.len()), colors::EXCLUDED),
    ]));
}

fn list_entries(title: &str, sign: &str, entries: &BTreeSet<String>, limit: usize) {
    if entries.is_empty() {
        return;
    }

    print::header(title);
    for entry in entries.iter().take(limit) {
        print::print(&format!("  {} {}", sign.color(colors::ACCENT), entry));
    }
    if entries.len() > limit {
        print::print_status(format!("... and {} more", entries.len() - limit));
    }
}
