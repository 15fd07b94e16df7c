use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;

use tracing::debug;
use wildsift_common::asset::RootDomain;

use crate::roots::{RootIndex, normalize_host};

static NO_IPS: BTreeSet<IpAddr> = BTreeSet::new();

pub struct DnsFingerprintBuilder<'r> {
    roots: &'r RootIndex,
    real: HashMap<String, BTreeSet<IpAddr>>,
    wildcard: HashMap<RootDomain, BTreeSet<IpAddr>>,
    discarded_probes: usize,
}

impl<'r> DnsFingerprintBuilder<'r> {
    pub fn new(roots: &'r RootIndex) -> Self {
        Self {
            roots,
            real: HashMap::new(),
            wildcard: HashMap::new(),
            discarded_probes: 0,
        }
    }

    /// Merges addresses observed for a real host. Called once per record type stream.
    pub fn record_real<I>(&mut self, host: &str, ips: I)
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let host = normalize_host(host);
        if host.is_empty() {
            return;
        }
        self.real.entry(host).or_default().extend(ips);
    }

    /// Merges addresses returned for a random probe name into its root's fingerprint.
    pub fn record_wildcard_probe<I>(&mut self, host: &str, ips: I)
    where
        I: IntoIterator<Item = IpAddr>,
    {
        match self.roots.resolve_root(host) {
            Some(root) => {
                self.wildcard.entry(root.clone()).or_default().extend(ips);
            }
            None => {
                debug!("Discarding wildcard DNS probe outside tracked roots: {host}");
                self.discarded_probes += 1;
            }
        }
    }

    pub fn finish(self) -> DnsFingerprints {
        DnsFingerprints {
            real: self.real,
            wildcard: self.wildcard,
            discarded_probes: self.discarded_probes,
        }
    }
}

/// Frozen DNS view of the run.
#[derive(Debug, Default)]
pub struct DnsFingerprints {
    real: HashMap<String, BTreeSet<IpAddr>>,
    wildcard: HashMap<RootDomain, BTreeSet<IpAddr>>,
    discarded_probes: usize,
}

impl DnsFingerprints {
    pub fn real_ips(&self, host: &str) -> &BTreeSet<IpAddr> {
        self.real.get(&normalize_host(host)).unwrap_or(&NO_IPS)
    }

    /// Empty when the root had no probes. That means "no DNS signal", not "not a wildcard".
    pub fn wildcard_ips(&self, root: &RootDomain) -> &BTreeSet<IpAddr> {
        self.wildcard.get(root).unwrap_or(&NO_IPS)
    }

    pub fn host_count(&self) -> usize {
        self.real.len()
    }

    pub fn wildcard_roots(&self) -> impl Iterator<Item = &RootDomain> {
        self.wildcard
            .iter()
            .filter(|(_, ips)| !ips.is_empty())
            .map(|(root, _)| root)
    }

    pub fn discarded_probes(&self) -> usize {
        self.discarded_probes
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
