//! # Root Index
//!
//! Maps a hostname to the tracked apex domain that owns it.
//!
//! Roots are ordered most-specific first: more DNS labels wins, then the longer
//! spelling, then plain lexicographic order so equal candidates still resolve the
//! same way on every run.

use std::path::Path;

use tracing::debug;
use wildsift_common::asset::RootDomain;
use wildsift_common::{Error, Result};

#[derive(Debug, Clone)]
pub struct RootIndex {
    roots: Vec<RootDomain>,
}

impl RootIndex {
    /// Builds the index. An empty list is a configuration error.
    pub fn new(roots: Vec<RootDomain>, source: &str) -> Result<Self> {
        if roots.is_empty() {
            return Err(Error::NoRootDomains {
                path: source.to_string(),
            });
        }

        let mut roots = roots;
        roots.sort_by(|a, b| {
            b.label_count()
                .cmp(&a.label_count())
                .then_with(|| b.as_str().len().cmp(&a.as_str().len()))
                .then_with(|| a.cmp(b))
        });
        roots.dedup();

        Ok(Self { roots })
    }

    /// Reads the allowlist at `path` and builds the index from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let roots = read_roots(path)?;
        Self::new(roots, &path.display().to_string())
    }

    /// Returns the first root that is `host` itself or a suffix of it on a label boundary.
    pub fn resolve_root(&self, host: &str) -> Option<&RootDomain> {
        let host = normalize_host(host);
        self.roots.iter().find(|root| root.covers(&host))
    }

    pub fn roots(&self) -> &[RootDomain] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Reads a root-domain allowlist, keeping file order.
///
/// A missing file or one without a single usable entry is fatal.
pub fn read_roots(path: impl AsRef<Path>) -> Result<Vec<RootDomain>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::RootsFileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path)?;
    let roots: Vec<RootDomain> = String::from_utf8_lossy(&bytes)
        .lines()
        .filter_map(RootDomain::parse)
        .collect();

    if roots.is_empty() {
        return Err(Error::NoRootDomains {
            path: path.display().to_string(),
        });
    }

    debug!("Loaded {} root domains from {}", roots.len(), path.display());
    Ok(roots)
}

/// Lowercases and drops trailing dots.
pub fn normalize_host(host: &str) -> String {
    host.trim().to_lowercase().trim_end_matches('.').to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
