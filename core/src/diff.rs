//! # Run Diffing
//!
//! Compares the line-oriented artifacts of two recon runs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use wildsift_common::{Error, Result};

pub const SUBDOMAINS_FILE: &str = "subs.txt";
pub const RESOLVED_FILE: &str = "hosts.resolved.txt";
pub const LIVE_URLS_FILE: &str = "final.urls.txt";
pub const OPEN_PORTS_FILE: &str = "open.ports.txt";

/// Membership change of one artifact between two runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDelta {
    pub old_count: usize,
    pub new_count: usize,
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl SetDelta {
    pub fn between(old: &BTreeSet<String>, new: &BTreeSet<String>) -> Self {
        Self {
            old_count: old.len(),
            new_count: new.len(),
            added: new.difference(old).cloned().collect(),
            removed: old.difference(new).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.old_count == 0 && self.new_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDiff {
    pub old_dir: PathBuf,
    pub new_dir: PathBuf,
    pub subdomains: SetDelta,
    pub resolved: SetDelta,
    pub live_urls: SetDelta,
    pub open_ports: SetDelta,
}

impl RunDiff {
    /// Both directories must exist; missing artifacts inside them count as empty.
    pub fn between(old_dir: &Path, new_dir: &Path) -> Result<Self> {
        for dir in [old_dir, new_dir] {
            if !dir.is_dir() {
                return Err(Error::RunDirectoryNotFound {
                    path: dir.display().to_string(),
                });
            }
        }

        let delta = |name: &str| -> Result<SetDelta> {
            let old = read_lines(&old_dir.join(name))?;
            let new = read_lines(&new_dir.join(name))?;
            Ok(SetDelta::between(&old, &new))
        };

        Ok(Self {
            old_dir: old_dir.to_path_buf(),
            new_dir: new_dir.to_path_buf(),
            subdomains: delta(SUBDOMAINS_FILE)?,
            resolved: delta(RESOLVED_FILE)?,
            live_urls: delta(LIVE_URLS_FILE)?,
            open_ports: delta(OPEN_PORTS_FILE)?,
        })
    }

    /// Writes the added/removed lists into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let files = [
            ("new_subdomains.txt", &self.subdomains.added),
            ("new_live_urls.txt", &self.live_urls.added),
            ("removed_live_urls.txt", &self.live_urls.removed),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, lines) in files {
            let path = dir.join(name);
            let body: String = lines.iter().map(|line| format!("{line}\n")).collect();
            std::fs::write(&path, body)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Trimmed, non-empty lines of `path`; a missing file is an empty set.
pub fn read_lines(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
