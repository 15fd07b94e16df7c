//! Writers for the run's output files.

use std::path::{Path, PathBuf};

use tracing::info;
use wildsift_common::Result;
use wildsift_common::asset::AssetRecord;

use crate::engine::RunOutcome;

pub const FINAL_URLS_FILE: &str = "final.urls.txt";
pub const REVIEW_URLS_FILE: &str = "review.wildcards.txt";
pub const AUDIT_FILE: &str = "all.assets.tsv";
pub const SUMMARY_FILE: &str = "summary.json";

const AUDIT_HEADER: [&str; 11] = [
    "host",
    "url",
    "status",
    "length",
    "title",
    "location",
    "dns_wild_strict",
    "dns_wild_loose",
    "http_wild_strong",
    "http_wild_weak",
    "decision",
];

/// Paths of everything [`write_outputs`] produced.
#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub final_urls: PathBuf,
    pub review_urls: PathBuf,
    pub audit: PathBuf,
    pub summary: PathBuf,
}

pub async fn write_outputs(outdir: &Path, outcome: &RunOutcome) -> Result<WrittenOutputs> {
    tokio::fs::create_dir_all(outdir).await?;

    let written = WrittenOutputs {
        final_urls: outdir.join(FINAL_URLS_FILE),
        review_urls: outdir.join(REVIEW_URLS_FILE),
        audit: outdir.join(AUDIT_FILE),
        summary: outdir.join(SUMMARY_FILE),
    };

    let classification = &outcome.classification;
    tokio::fs::write(&written.final_urls, url_list(&classification.final_urls)).await?;
    tokio::fs::write(&written.review_urls, url_list(&classification.review_urls)).await?;
    tokio::fs::write(&written.audit, audit_table(&classification.rows)).await?;

    let mut summary = serde_json::to_string_pretty(&outcome.summary)?;
    summary.push('\n');
    tokio::fs::write(&written.summary, summary).await?;

    info!("Wrote results to {}", outdir.display());
    Ok(written)
}

pub fn url_list(urls: &[String]) -> String {
    urls.iter().map(|url| format!("{url}\n")).collect()
}

/// Tab-separated audit table with a header row.
pub fn audit_table(rows: &[AssetRecord]) -> String {
    let mut out = AUDIT_HEADER.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&audit_row(row));
        out.push('\n');
    }
    out
}

fn audit_row(row: &AssetRecord) -> String {
    let sig = &row.signature;
    [
        row.host.clone(),
        row.url.clone(),
        sig.status_code.to_string(),
        sig.content_length.to_string(),
        cell(&sig.title),
        cell(&sig.location),
        yes_no(row.flags.dns_strict).to_string(),
        yes_no(row.flags.dns_loose).to_string(),
        yes_no(row.flags.http_strong).to_string(),
        yes_no(row.flags.http_weak).to_string(),
        row.decision.to_string(),
    ]
    .join("\t")
}

fn cell(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
