use std::collections::HashMap;

use tracing::debug;
use wildsift_common::asset::{HttpSignature, RootDomain};

use crate::roots::RootIndex;

/// Occurrence counts in first-seen order.
#[derive(Debug, Default)]
struct Tally {
    slots: Vec<(HttpSignature, usize)>,
    index: HashMap<HttpSignature, usize>,
}

impl Tally {
    fn add(&mut self, signature: HttpSignature) {
        match self.index.get(&signature) {
            Some(&slot) => self.slots[slot].1 += 1,
            None => {
                self.index.insert(signature.clone(), self.slots.len());
                self.slots.push((signature, 1));
            }
        }
    }

    /// Highest count; on a tie the signature seen first.
    fn mode(self) -> Option<HttpSignature> {
        let mut best: Option<(HttpSignature, usize)> = None;
        for (signature, count) in self.slots {
            match &best {
                Some((_, best_count)) if *best_count >= count => {}
                _ => best = Some((signature, count)),
            }
        }
        best.map(|(signature, _)| signature)
    }
}

pub struct HttpFingerprintBuilder<'r> {
    roots: &'r RootIndex,
    tallies: HashMap<RootDomain, Tally>,
    discarded_probes: usize,
}

impl<'r> HttpFingerprintBuilder<'r> {
    pub fn new(roots: &'r RootIndex) -> Self {
        Self {
            roots,
            tallies: HashMap::new(),
            discarded_probes: 0,
        }
    }

    pub fn record_wildcard_probe(&mut self, host: &str, signature: HttpSignature) {
        match self.roots.resolve_root(host) {
            Some(root) => self.tallies.entry(root.clone()).or_default().add(signature),
            None => {
                debug!("Discarding wildcard HTTP probe outside tracked roots: {host}");
                self.discarded_probes += 1;
            }
        }
    }

    /// Reduces every root's probes to its most frequent signature.
    pub fn finish(self) -> HttpFingerprints {
        let signatures = self
            .tallies
            .into_iter()
            .filter_map(|(root, tally)| tally.mode().map(|sig| (root, sig)))
            .collect();

        HttpFingerprints {
            signatures,
            discarded_probes: self.discarded_probes,
        }
    }
}

#[derive(Debug, Default)]
pub struct HttpFingerprints {
    signatures: HashMap<RootDomain, HttpSignature>,
    discarded_probes: usize,
}

impl HttpFingerprints {
    /// `None` when the root had zero wildcard HTTP probes.
    pub fn fingerprint(&self, root: &RootDomain) -> Option<&HttpSignature> {
        self.signatures.get(root)
    }

    pub fn roots(&self) -> impl Iterator<Item = &RootDomain> {
        self.signatures.keys()
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
