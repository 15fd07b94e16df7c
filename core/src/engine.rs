//! # Classification Pipeline
//!
//! Wires the stages together for one batch run:
//!
//! 1. **Roots**: load the allowlist. Failure here aborts the run.
//! 2. **Ingest**: read the six JSONL streams concurrently.
//! 3. **Fingerprint**: fold wildcard probes into per-root fingerprints.
//! 4. **Classify**: compare every real HTTP record against its root.
//! 5. **Aggregate**: partition into final and review lists.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use wildsift_common::{Error, Result};
use wildsift_common::asset::{HttpSignature, RootDomain};
use wildsift_common::config::MatchConfig;

use crate::aggregate::{Classification, DecisionCounts, ResultAggregator};
use crate::classify::ClassificationEngine;
use crate::compare::SignatureComparator;
use crate::fingerprint::{DnsFingerprintBuilder, HttpFingerprintBuilder};
use crate::ingest::{self, HttpObservation};
use crate::roots::RootIndex;

/// Locations of the run's inputs. Absent streams are treated as empty.
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub domains: PathBuf,
    pub dns_a: Option<PathBuf>,
    pub dns_aaaa: Option<PathBuf>,
    pub wild_dns_a: Option<PathBuf>,
    pub wild_dns_aaaa: Option<PathBuf>,
    pub wild_httpx: Option<PathBuf>,
    pub httpx: Option<PathBuf>,
}

/// Raw records of every input stream.
#[derive(Debug, Clone, Default)]
pub struct Streams {
    pub dns_a: Vec<Value>,
    pub dns_aaaa: Vec<Value>,
    pub wild_dns_a: Vec<Value>,
    pub wild_dns_aaaa: Vec<Value>,
    pub wild_httpx: Vec<Value>,
    pub httpx: Vec<Value>,
}

impl Streams {
    pub async fn read(inputs: &RunInputs) -> Self {
        let (dns_a, dns_aaaa, wild_dns_a, wild_dns_aaaa, wild_httpx, httpx) = tokio::join!(
            read_optional(inputs.dns_a.as_deref()),
            read_optional(inputs.dns_aaaa.as_deref()),
            read_optional(inputs.wild_dns_a.as_deref()),
            read_optional(inputs.wild_dns_aaaa.as_deref()),
            read_optional(inputs.wild_httpx.as_deref()),
            read_optional(inputs.httpx.as_deref()),
        );
        Self {
            dns_a,
            dns_aaaa,
            wild_dns_a,
            wild_dns_aaaa,
            wild_httpx,
            httpx,
        }
    }
}

async fn read_optional(path: Option<&Path>) -> Vec<Value> {
    match path {
        Some(path) => ingest::read_jsonl(path).await,
        None => Vec::new(),
    }
}

/// What a root's wildcard probes looked like.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFingerprint {
    pub root: RootDomain,
    pub wildcard_ips: BTreeSet<IpAddr>,
    pub http: Option<HttpSignature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub decisions: DecisionCounts,
    pub roots: usize,
    pub roots_with_wildcard_dns: usize,
    pub roots_with_wildcard_http: usize,
    pub simhash_max_distance: u32,
    pub content_length_tolerance_pct: f64,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub classification: Classification,
    /// One entry per tracked root, most specific first.
    pub fingerprints: Vec<RootFingerprint>,
    pub summary: RunSummary,
}

/// Runs the full pipeline. Configuration problems and a failed worker are the only errors.
///
/// Fingerprinting and classification run on the blocking pool.
pub async fn run(inputs: &RunInputs, config: &MatchConfig) -> Result<RunOutcome> {
    config.validate()?;
    let roots = RootIndex::load(&inputs.domains)?;
    info!("Tracking {} root domains", roots.len());

    let streams = Streams::read(inputs).await;
    let config = *config;
    tokio::task::spawn_blocking(move || classify_streams(&roots, &streams, &config))
        .await
        .map_err(|e| Error::Worker(e.to_string()))
}

/// Builds fingerprints from already-read streams and classifies every real HTTP record.
pub fn classify_streams(roots: &RootIndex, streams: &Streams, config: &MatchConfig) -> RunOutcome {
    let mut dns = DnsFingerprintBuilder::new(roots);
    for obs in streams
        .dns_a
        .iter()
        .chain(&streams.dns_aaaa)
        .filter_map(ingest::dns_observation)
    {
        dns.record_real(&obs.host, obs.ips);
    }
    for obs in streams
        .wild_dns_a
        .iter()
        .chain(&streams.wild_dns_aaaa)
        .filter_map(ingest::dns_observation)
    {
        dns.record_wildcard_probe(&obs.host, obs.ips);
    }
    let dns = dns.finish();

    let mut http = HttpFingerprintBuilder::new(roots);
    for obs in streams.wild_httpx.iter().filter_map(ingest::http_observation) {
        http.record_wildcard_probe(&obs.host, obs.signature);
    }
    let http = http.finish();

    debug!(
        "Fingerprinted {} hosts; discarded {} DNS and {} HTTP probes outside tracked roots",
        dns.host_count(),
        dns.discarded_probes(),
        http.discarded_probes()
    );

    let observations: Vec<HttpObservation> = streams
        .httpx
        .iter()
        .filter_map(ingest::http_observation)
        .collect();

    let engine = ClassificationEngine::new(roots, &dns, &http, SignatureComparator::new(*config));
    let mut aggregator = ResultAggregator::new();
    aggregator.extend(engine.classify_all(&observations));
    let classification = aggregator.finish();

    let fingerprints: Vec<RootFingerprint> = roots
        .roots()
        .iter()
        .map(|root| RootFingerprint {
            root: root.clone(),
            wildcard_ips: dns.wildcard_ips(root).clone(),
            http: http.fingerprint(root).cloned(),
        })
        .collect();

    let summary = RunSummary {
        decisions: classification.counts(),
        roots: roots.len(),
        roots_with_wildcard_dns: dns.wildcard_roots().count(),
        roots_with_wildcard_http: http.roots().count(),
        simhash_max_distance: config.simhash_max_distance,
        content_length_tolerance_pct: config.content_length_tolerance_pct,
    };

    info!(
        "Classified {} assets: {} keep, {} review, {} excluded",
        summary.decisions.total,
        summary.decisions.keep,
        summary.decisions.review,
        summary.decisions.exclude_wildcard_strong
    );

    RunOutcome {
        classification,
        fingerprints,
        summary,
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
