use std::fmt;

/// A normalized apex domain tracked for the run.
///
/// Lowercase, no trailing dot, never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RootDomain(String);

impl RootDomain {
    /// Normalizes one allowlist line.
    ///
    /// Everything after `#` is a comment. Returns `None` for lines that are blank
    /// once the comment and surrounding whitespace are removed.
    pub fn parse(line: &str) -> Option<Self> {
        let entry = line.split('#').next().unwrap_or_default();
        let entry = entry.trim().to_lowercase();
        let entry = entry.trim_end_matches('.');
        if entry.is_empty() {
            return None;
        }
        Some(Self(entry.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn label_count(&self) -> usize {
        self.0.split('.').count()
    }

    /// True when `host` is this root or a name below it.
    ///
    /// `host` must already be normalized.
    pub fn covers(&self, host: &str) -> bool {
        match host.strip_suffix(self.0.as_str()) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for RootDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RootDomain {
    fn as_ref(&self) -> &str {
        &self.0
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
    fn parse_strips_comments_case_and_trailing_dots() {
        let root = RootDomain::parse("  Example.COM.. # corp apex").unwrap();
        assert_eq!(root.as_str(), "example.com");
    }

    #[test]
    fn parse_skips_blank_and_comment_only_lines() {
        assert!(RootDomain::parse("").is_none());
        assert!(RootDomain::parse("   ").is_none());
        assert!(RootDomain::parse("# just a note").is_none());
        assert!(RootDomain::parse(".").is_none());
    }

    #[test]
    fn covers_requires_a_label_boundary() {
        let root = RootDomain::parse("example.com").unwrap();
        assert!(root.covers("example.com"));
        assert!(root.covers("a.b.example.com"));
        assert!(!root.covers("badexample.com"));
        assert!(!root.covers("example.com.evil.net"));
    }

    #[test]
    fn label_count_counts_dns_labels() {
        assert_eq!(RootDomain::parse("co.uk").unwrap().label_count(), 2);
        assert_eq!(RootDomain::parse("shop.example.co.uk").unwrap().label_count(), 4);
    }
}
