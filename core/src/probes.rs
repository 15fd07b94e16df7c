//! Random probe names used to sample each root's wildcard behaviour.

use rand::Rng;
use wildsift_common::asset::RootDomain;

const LABEL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const LABEL_LEN: usize = 18;

pub fn random_label<R: Rng>(rng: &mut R) -> String {
    (0..LABEL_LEN)
        .map(|_| LABEL_ALPHABET[rng.random_range(0..LABEL_ALPHABET.len())] as char)
        .collect()
}

/// `samples` random hostnames under every root, roots in the given order.
pub fn probe_hosts<R: Rng>(
    roots: &[RootDomain],
    samples: usize,
    rng: &mut R,
) -> Vec<String> {
    roots
        .iter()
        .flat_map(|root| std::iter::repeat_n(root, samples))
        .map(|root| format!("{}.{}", random_label(rng), root))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
