use std::fmt;

use serde::Serialize;

/// The four independent pieces of wildcard evidence gathered for one host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchFlags {
    /// Host IP set equals the root's wildcard IP set.
    pub dns_strict: bool,
    /// Host IP set is a non-empty subset of the root's wildcard IP set.
    pub dns_loose: bool,
    /// Same status and title/location, and near-identical simhash.
    pub http_strong: bool,
    /// Partial HTTP resemblance only.
    pub http_weak: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// No wildcard signal of any kind.
    Keep,
    /// Partial signal, left for an analyst.
    Review,
    /// Both strict DNS and strong HTTP evidence.
    ExcludeWildcardStrong,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "KEEP",
            Decision::Review => "REVIEW",
            Decision::ExcludeWildcardStrong => "EXCLUDE_WILDCARD_STRONG",
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Decision::Keep)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
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
