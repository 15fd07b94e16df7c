use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_SIMHASH_MAX_DISTANCE: u32 = 3;
pub const DEFAULT_CONTENT_LENGTH_TOLERANCE_PCT: f64 = 5.0;

pub struct Config {
    /// Hides the banner printed at startup.
    pub no_banner: bool,
    /// `1` hides headers and trees, `2` also hides the summary lines.
    pub quiet: u8,
    /// Thresholds handed to the signature comparator.
    pub matching: MatchConfig,
}

/// Tunables for comparing a host against its root's wildcard fingerprint.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Highest simhash Hamming distance still counted as a strong HTTP match.
    pub simhash_max_distance: u32,
    /// Relative tolerance, in percent, for two content lengths to count as close.
    pub content_length_tolerance_pct: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            simhash_max_distance: DEFAULT_SIMHASH_MAX_DISTANCE,
            content_length_tolerance_pct: DEFAULT_CONTENT_LENGTH_TOLERANCE_PCT,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        let tol = self.content_length_tolerance_pct;
        if !tol.is_finite() || tol < 0.0 {
            return Err(Error::InvalidConfig {
                key: "content_length_tolerance_pct".to_string(),
                message: format!("expected a non-negative number, got {tol}"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    no_banner: bool,
    #[serde(default)]
    quiet: u8,
    #[serde(default)]
    matching: MatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            matching: MatchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("failed to parse config: {e}")))?;
        file.matching.validate()?;
        Ok(Self {
            no_banner: file.no_banner,
            quiet: file.quiet,
            matching: file.matching,
        })
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

    #[test]
    fn defaults_match_documented_values() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.simhash_max_distance, 3);
        assert_eq!(cfg.content_length_tolerance_pct, 5.0);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg = Config::from_toml("[matching]\nsimhash_max_distance = 6\n").unwrap();
        assert_eq!(cfg.matching.simhash_max_distance, 6);
        assert_eq!(cfg.matching.content_length_tolerance_pct, 5.0);
        assert_eq!(cfg.quiet, 0);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.matching, MatchConfig::default());
        assert!(!cfg.no_banner);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = Config::from_toml("[matching]\ncontent_length_tolerance_pct = -1.0\n")
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_toml_is_a_configuration_error() {
        let err = Config::from_toml("[matching\n").err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
