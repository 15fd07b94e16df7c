use std::path::Path;

use colored::*;
use tracing::info;

use crate::mprint;
use crate::terminal::{colors, print};
use wildsift_core::stats::RunStats;

const STATUS_CODES_SHOWN: usize = 10;
const TECHNOLOGIES_SHOWN: usize = 15;
const SEVERITIES: [&str; 5] = ["critical", "high", "medium", "low", "info"];

pub fn stats(outdir: &Path) -> anyhow::Result<()> {
    let stats = RunStats::collect(outdir)?;

    print::header("recon run statistics");
    section(
        0,
        "Subdomain enumeration",
        &[
            ("Raw", stats.subdomains.raw),
            ("Cleaned", stats.subdomains.cleaned),
        ],
    );
    section(
        1,
        "DNS resolution",
        &[
            ("Resolved", stats.dns.resolved),
            ("A records", stats.dns.a_records),
            ("AAAA records", stats.dns.aaaa_records),
        ],
    );
    section(
        2,
        "HTTP probing",
        &[
            ("Live", stats.http.live),
            ("Final", stats.http.final_targets),
            ("Review", stats.http.wildcard_review),
        ],
    );

    let mut idx: usize = 3;
    let status_codes: Vec<(String, usize)> = stats
        .top_status_codes(STATUS_CODES_SHOWN)
        .into_iter()
        .map(|(code, n)| (code.to_string(), n))
        .collect();
    if !status_codes.is_empty() {
        owned_section(idx, "Status codes", &status_codes);
        idx += 1;
    }

    let technologies: Vec<(String, usize)> = stats.top_technologies(TECHNOLOGIES_SHOWN);
    if !technologies.is_empty() {
        owned_section(idx, "Technologies", &technologies);
        idx += 1;
    }

    if stats.ports.open > 0 {
        section(idx, "Port scanning", &[("Open", stats.ports.open)]);
        idx += 1;
    }

    let vulns = &stats.vulnerabilities;
    if vulns.nuclei_total > 0 {
        let mut rows: Vec<(String, usize)> = vec![("Total".to_string(), vulns.nuclei_total)];
        rows.extend(SEVERITIES.iter().filter_map(|sev| {
            vulns
                .nuclei_by_severity
                .get(*sev)
                .map(|n| (sev.to_uppercase(), *n))
        }));
        owned_section(idx, "Vulnerability scanning", &rows);
    }

    if let Some(resolution) = stats.resolution_rate() {
        let live: f64 = stats.live_rate().unwrap_or(0.0);
        mprint!();
        print::set_key_width(&["Resolution rate", "Live rate"]);
        print::aligned_line("Resolution rate", format!("{resolution:.1}%").color(colors::ACCENT));
        print::aligned_line("Live rate", format!("{live:.1}%").color(colors::ACCENT));
    }

    let path = stats.write_to(outdir)?;
    info!("Saved statistics to {}", path.display());

    print::closing_line(&format!(
        "{} live of {} subdomains, {} final",
        stats.http.live.to_string().color(colors::PRIMARY),
        stats.subdomains.cleaned.to_string().color(colors::PRIMARY),
        stats.http.final_targets.to_string().color(colors::KEEP)
    ));
    Ok(())
}

fn section(idx: usize, title: &str, rows: &[(&str, usize)]) {
    let rows: Vec<(String, usize)> = rows.iter().map(|(k, n)| (k.to_string(), *n)).collect();
    owned_section(idx, title, &rows);
}

fn owned_section(idx: usize, title: &str, rows: &[(String, usize)]) {
    mprint!();
    print::tree_head(idx, title);
    print::tree(
        &rows
            .iter()
            .map(|(key, n)| (key.clone(), n.to_string().color(colors::TEXT_DEFAULT)))
            .collect::<Vec<print::Detail>>(),
    );
}
