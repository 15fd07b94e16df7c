//! # Run Statistics
//!
//! Counts what each stage of a recon run produced, from the files it left in its
//! output directory. Every artifact is optional and counts as zero when missing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use wildsift_common::{Error, Result};

use crate::diff::{OPEN_PORTS_FILE, RESOLVED_FILE, SUBDOMAINS_FILE, read_lines};
use crate::ingest;
use crate::output::{FINAL_URLS_FILE, REVIEW_URLS_FILE};

pub const RAW_SUBDOMAINS_FILE: &str = "subs.raw.txt";
pub const DNS_A_FILE: &str = "dns.A.jsonl";
pub const DNS_AAAA_FILE: &str = "dns.AAAA.jsonl";
pub const HTTPX_FILE: &str = "httpx.jsonl";
pub const NUCLEI_FILE: &str = "vulns/nuclei.jsonl";
pub const STATS_FILE: &str = "stats.json";

/// Technologies beyond this many are left out of `stats.json`.
pub const TECHNOLOGIES_KEPT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubdomainStats {
    /// Every non-empty line, duplicates included.
    pub raw: usize,
    pub cleaned: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DnsStats {
    pub resolved: usize,
    pub a_records: usize,
    pub aaaa_records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HttpStats {
    pub live: usize,
    pub final_targets: usize,
    pub wildcard_review: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortStats {
    pub open: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VulnerabilityStats {
    pub nuclei_total: usize,
    pub nuclei_by_severity: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub subdomains: SubdomainStats,
    pub dns: DnsStats,
    pub http: HttpStats,
    /// Records with a zero or missing status are not counted.
    pub status_codes: BTreeMap<u16, usize>,
    pub technologies: BTreeMap<String, usize>,
    pub ports: PortStats,
    pub vulnerabilities: VulnerabilityStats,
}

impl RunStats {
    /// The directory must exist; the files inside it are all optional.
    pub fn collect(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::RunDirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let httpx = read_records(&dir.join(HTTPX_FILE))?;
        let nuclei = read_records(&dir.join(NUCLEI_FILE))?;

        let mut status_codes: BTreeMap<u16, usize> = BTreeMap::new();
        let mut technologies: BTreeMap<String, usize> = BTreeMap::new();
        for record in &httpx {
            let status = ingest::http_signature(record).status_code;
            if status != 0 {
                *status_codes.entry(status).or_default() += 1;
            }
            for tech in technologies_of(record) {
                *technologies.entry(tech).or_default() += 1;
            }
        }

        let mut nuclei_by_severity: BTreeMap<String, usize> = BTreeMap::new();
        for finding in &nuclei {
            *nuclei_by_severity.entry(severity_of(finding)).or_default() += 1;
        }

        let stats = Self {
            subdomains: SubdomainStats {
                raw: count_lines(&dir.join(RAW_SUBDOMAINS_FILE))?,
                cleaned: read_lines(&dir.join(SUBDOMAINS_FILE))?.len(),
            },
            dns: DnsStats {
                resolved: read_lines(&dir.join(RESOLVED_FILE))?.len(),
                a_records: read_records(&dir.join(DNS_A_FILE))?.len(),
                aaaa_records: read_records(&dir.join(DNS_AAAA_FILE))?.len(),
            },
            http: HttpStats {
                live: httpx.len(),
                final_targets: read_lines(&dir.join(FINAL_URLS_FILE))?.len(),
                wildcard_review: read_lines(&dir.join(REVIEW_URLS_FILE))?.len(),
            },
            status_codes,
            technologies: most_common(technologies, TECHNOLOGIES_KEPT).into_iter().collect(),
            ports: PortStats {
                open: read_lines(&dir.join(OPEN_PORTS_FILE))?.len(),
            },
            vulnerabilities: VulnerabilityStats {
                nuclei_total: nuclei.len(),
                nuclei_by_severity,
            },
        };
        debug!("Collected statistics for {}", dir.display());
        Ok(stats)
    }

    /// Writes `stats.json` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(STATS_FILE);
        let mut body = serde_json::to_string_pretty(self)?;
        body.push('\n');
        std::fs::write(&path, body)?;
        Ok(path)
    }

    pub fn top_status_codes(&self, n: usize) -> Vec<(u16, usize)> {
        most_common(self.status_codes.clone(), n)
    }

    pub fn top_technologies(&self, n: usize) -> Vec<(String, usize)> {
        most_common(self.technologies.clone(), n)
    }

    /// Share of cleaned subdomains that resolved, in percent.
    pub fn resolution_rate(&self) -> Option<f64> {
        percent(self.dns.resolved, self.subdomains.cleaned)
    }

    /// Share of resolved hosts that answered over HTTP, in percent.
    pub fn live_rate(&self) -> Option<f64> {
        percent(self.http.live, self.dns.resolved)
    }
}

fn percent(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

/// Highest counts first; equal counts keep key order.
fn most_common<K: Ord>(counts: BTreeMap<K, usize>, n: usize) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

fn read_records(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path)?;
    Ok(ingest::parse_jsonl(
        &path.display().to_string(),
        &String::from_utf8_lossy(&bytes),
    ))
}

fn count_lines(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count())
}

/// `tech` or `technologies`, as a list or a single string.
fn technologies_of(record: &Value) -> Vec<String> {
    let field = record
        .get("tech")
        .filter(|v| !v.is_null())
        .or_else(|| record.get("technologies"));

    match field {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(tech)) if !tech.is_empty() => vec![tech.clone()],
        _ => Vec::new(),
    }
}

fn severity_of(finding: &Value) -> String {
    finding
        .get("info")
        .and_then(|info| info.get("severity"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
