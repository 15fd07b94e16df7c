//! # Classification Engine
//!
//! Turns comparator evidence into exactly one [`Decision`] per real host.
//!
//! Auto-exclusion needs both strict DNS and strong HTTP evidence. Any partial
//! signal goes to review instead of being dropped.

use rayon::prelude::*;
use tracing::debug;
use wildsift_common::asset::{AssetRecord, Decision, MatchFlags};

use crate::compare::SignatureComparator;
use crate::fingerprint::{DnsFingerprints, HttpFingerprints};
use crate::ingest::HttpObservation;
use crate::roots::RootIndex;

pub fn decide(flags: &MatchFlags) -> Decision {
    if flags.http_strong && flags.dns_strict {
        Decision::ExcludeWildcardStrong
    } else if flags.http_strong || flags.dns_loose || flags.http_weak {
        Decision::Review
    } else {
        Decision::Keep
    }
}

pub struct ClassificationEngine<'a> {
    roots: &'a RootIndex,
    dns: &'a DnsFingerprints,
    http: &'a HttpFingerprints,
    comparator: SignatureComparator,
}

impl<'a> ClassificationEngine<'a> {
    pub fn new(
        roots: &'a RootIndex,
        dns: &'a DnsFingerprints,
        http: &'a HttpFingerprints,
        comparator: SignatureComparator,
    ) -> Self {
        Self {
            roots,
            dns,
            http,
            comparator,
        }
    }

    /// Evidence for one host against its root's fingerprints.
    ///
    /// A host outside every tracked root has no fingerprint to match and yields no flags.
    pub fn flags_for(&self, observation: &HttpObservation) -> MatchFlags {
        let real_ips = self.dns.real_ips(&observation.host);
        match self.roots.resolve_root(&observation.host) {
            Some(root) => self.comparator.compare(
                &observation.signature,
                real_ips,
                self.http.fingerprint(root),
                self.dns.wildcard_ips(root),
            ),
            None => MatchFlags::default(),
        }
    }

    pub fn classify(&self, observation: &HttpObservation) -> AssetRecord {
        let flags = self.flags_for(observation);
        AssetRecord {
            host: observation.host.clone(),
            url: observation.url.clone(),
            signature: observation.signature.clone(),
            flags,
            decision: decide(&flags),
        }
    }

    /// Classifies every observation that has both a host and a URL, keeping input order.
    pub fn classify_all(&self, observations: &[HttpObservation]) -> Vec<AssetRecord> {
        let records: Vec<AssetRecord> = observations
            .par_iter()
            .filter(|obs| !obs.url.is_empty() && !obs.host.is_empty())
            .map(|obs| self.classify(obs))
            .collect();

        let dropped = observations.len() - records.len();
        if dropped > 0 {
            debug!("Dropped {dropped} HTTP records without a usable URL");
        }
        records
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;
    use wildsift_common::asset::{HttpSignature, RootDomain};
    use wildsift_common::config::MatchConfig;

    use crate::fingerprint::{DnsFingerprintBuilder, HttpFingerprintBuilder};

    fn flags(dns_strict: bool, dns_loose: bool, http_strong: bool, http_weak: bool) -> MatchFlags {
        MatchFlags {
            dns_strict,
            dns_loose,
            http_strong,
            http_weak,
        }
    }

    #[test]
    fn exclusion_needs_strict_dns_and_strong_http() {
        assert_eq!(decide(&flags(true, true, true, false)), Decision::ExcludeWildcardStrong);
        assert_eq!(decide(&flags(true, false, true, false)), Decision::ExcludeWildcardStrong);
        assert_eq!(decide(&flags(false, false, true, false)), Decision::Review);
        assert_eq!(decide(&flags(true, true, false, false)), Decision::Review);
    }

    #[test]
    fn any_partial_signal_is_review() {
        assert_eq!(decide(&flags(false, true, false, false)), Decision::Review);
        assert_eq!(decide(&flags(false, false, false, true)), Decision::Review);
    }

    #[test]
    fn strict_dns_alone_without_loose_is_keep() {
        // Unreachable through the comparator (strict implies loose) but the policy itself only
        // reads the loose flag for DNS-only evidence.
        assert_eq!(decide(&flags(true, false, false, false)), Decision::Keep);
    }

    #[test]
    fn no_signal_is_keep() {
        assert_eq!(decide(&MatchFlags::default()), Decision::Keep);
    }

    fn observation(host: &str, url: &str, signature: HttpSignature) -> HttpObservation {
        HttpObservation {
            host: host.to_string(),
            url: url.to_string(),
            signature,
        }
    }

    #[test]
    fn classify_all_skips_records_without_url_and_keeps_order() {
        let roots = RootIndex::new(vec![RootDomain::parse("example.com").unwrap()], "t").unwrap();
        let ip: IpAddr = "1.2.3.4".parse().unwrap();
        let parked = HttpSignature::new(200, "Parked", "", Some(1), 100);

        let mut dns = DnsFingerprintBuilder::new(&roots);
        dns.record_real("a.example.com", [ip]);
        dns.record_wildcard_probe("zz.example.com", [ip]);
        let dns = dns.finish();

        let mut http = HttpFingerprintBuilder::new(&roots);
        http.record_wildcard_probe("zz.example.com", parked.clone());
        let http = http.finish();

        let engine = ClassificationEngine::new(
            &roots,
            &dns,
            &http,
            SignatureComparator::new(MatchConfig::default()),
        );

        let records = engine.classify_all(&[
            observation("a.example.com", "https://a.example.com", parked.clone()),
            observation("b.example.com", "", parked.clone()),
            observation("c.other.net", "https://c.other.net", parked),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].decision, Decision::ExcludeWildcardStrong);
        assert_eq!(records[1].host, "c.other.net");
        assert_eq!(records[1].decision, Decision::Keep);
    }
}
