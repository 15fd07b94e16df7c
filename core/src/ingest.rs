//! # JSONL Ingestion
//!
//! Turns newline-delimited JSON from DNS and HTTP probers into typed observations.
//!
//! Every failure here is soft: a missing stream is empty, a malformed line is
//! skipped, a record without a usable host is dropped.

use std::net::IpAddr;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};
use wildsift_common::asset::HttpSignature;

use crate::roots::normalize_host;

const DNS_ADDRESS_KEYS: [&str; 4] = ["a", "A", "aaaa", "AAAA"];

#[derive(Debug, Clone, PartialEq)]
pub struct DnsObservation {
    pub host: String,
    pub ips: Vec<IpAddr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpObservation {
    pub host: String,
    /// Empty when the record carried no URL.
    pub url: String,
    pub signature: HttpSignature,
}

/// Reads one JSONL stream. A missing or unreadable file is logged and yields nothing.
pub async fn read_jsonl(path: &Path) -> Vec<Value> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, skipping", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Error reading {}: {e}", path.display());
            return Vec::new();
        }
    };

    let records = parse_jsonl(&path.display().to_string(), &String::from_utf8_lossy(&bytes));
    debug!("Read {} records from {}", records.len(), path.display());
    records
}

/// Parses JSONL text, skipping blank and malformed lines.
pub fn parse_jsonl(source: &str, content: &str) -> Vec<Value> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("JSON decode error in {source}:{}: {e}", idx + 1);
                    None
                }
            }
        })
        .collect()
}

/// The record's host, falling back to the authority part of its URL.
///
/// Userinfo and a port are stripped from either source.
pub fn host_of(obj: &Value) -> Option<String> {
    let explicit = obj
        .get("host")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|h| !h.is_empty());

    let host = match explicit {
        Some(host) => strip_authority(host),
        None => {
            let url = obj.get("url").and_then(Value::as_str)?;
            host_from_url(url)?
        }
    };

    let host = normalize_host(host);
    (!host.is_empty()).then_some(host)
}

fn host_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    Some(strip_authority(authority))
}

/// Drops userinfo, IPv6 brackets and a trailing `:port`.
fn strip_authority(authority: &str) -> &str {
    let authority = authority.rsplit('@').next().unwrap_or_default();

    if let Some(v6) = authority.strip_prefix('[') {
        return v6.split(']').next().unwrap_or_default();
    }
    match authority.split_once(':') {
        // A bare IPv6 address has more than one colon and no port.
        Some((host, port)) if !port.contains(':') => host,
        _ => authority,
    }
}

pub fn dns_observation(obj: &Value) -> Option<DnsObservation> {
    let host = host_of(obj)?;
    let mut ips = Vec::new();

    for key in DNS_ADDRESS_KEYS {
        let Some(values) = obj.get(key).and_then(Value::as_array) else {
            continue;
        };
        for value in values {
            let text = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Null => continue,
                other => other.to_string(),
            };
            if text.is_empty() {
                continue;
            }
            match text.parse::<IpAddr>() {
                Ok(ip) => ips.push(ip),
                Err(_) => debug!("Ignoring unparseable address {text:?} for {host}"),
            }
        }
    }

    Some(DnsObservation { host, ips })
}

pub fn http_observation(obj: &Value) -> Option<HttpObservation> {
    let host = host_of(obj)?;
    let url = string_field(obj, "url");
    Some(HttpObservation {
        host,
        url,
        signature: http_signature(obj),
    })
}

pub fn http_signature(obj: &Value) -> HttpSignature {
    HttpSignature {
        status_code: u16::try_from(integer_field(obj, "status_code")).unwrap_or(0),
        title: string_field(obj, "title"),
        location: string_field(obj, "location"),
        simhash: simhash_field(obj),
        content_length: integer_field(obj, "content_length"),
    }
}

fn string_field(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn integer_field(obj: &Value, key: &str) -> u64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn simhash_field(obj: &Value) -> Option<u64> {
    match obj.get("hash")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
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
