//! # Signature Comparator
//!
//! Compares one real host against its root's wildcard fingerprint and reports four
//! independent evidence flags. No decision is taken here; see [`crate::classify`].

use std::collections::BTreeSet;
use std::net::IpAddr;

use wildsift_common::asset::{HttpSignature, MatchFlags};
use wildsift_common::config::MatchConfig;

#[derive(Debug, Clone, Copy)]
pub struct SignatureComparator {
    config: MatchConfig,
}

impl SignatureComparator {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn compare(
        &self,
        real_sig: &HttpSignature,
        real_ips: &BTreeSet<IpAddr>,
        wildcard_sig: Option<&HttpSignature>,
        wildcard_ips: &BTreeSet<IpAddr>,
    ) -> MatchFlags {
        let mut flags = MatchFlags {
            dns_strict: !wildcard_ips.is_empty() && real_ips == wildcard_ips,
            dns_loose: !wildcard_ips.is_empty()
                && !real_ips.is_empty()
                && real_ips.is_subset(wildcard_ips),
            ..MatchFlags::default()
        };

        let Some(wild) = wildcard_sig else {
            return flags;
        };

        let same_status = real_sig.status_code == wild.status_code;
        let same_title = !real_sig.title.is_empty() && real_sig.title == wild.title;
        let same_location = !real_sig.location.is_empty() && real_sig.location == wild.location;
        let close_length = self.lengths_close(real_sig.content_length, wild.content_length);

        if same_status && (same_title || same_location) {
            match (real_sig.simhash, wild.simhash) {
                (Some(real_hash), Some(wild_hash)) => {
                    if hamming_distance(real_hash, wild_hash) <= self.config.simhash_max_distance {
                        flags.http_strong = true;
                    } else {
                        flags.http_weak = true;
                    }
                }
                // Without both hashes a strong verdict is never granted.
                _ => flags.http_weak = close_length,
            }
        } else if same_status && close_length {
            flags.http_weak = true;
        }

        flags
    }

    fn lengths_close(&self, a: u64, b: u64) -> bool {
        content_length_close(a, b, self.config.content_length_tolerance_pct)
    }
}

/// Number of differing bits.
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Relative closeness of two content lengths. A zero length is never close.
pub fn content_length_close(a: u64, b: u64, tolerance_pct: f64) -> bool {
    if a == 0 || b == 0 {
        return false;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (hi - lo) as f64 / hi as f64 <= tolerance_pct / 100.0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
