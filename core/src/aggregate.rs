//! # Result Aggregator
//!
//! Partitions classified records into the confidently-real list, the review list and
//! the full audit trail.

use std::collections::BTreeSet;

use serde::Serialize;
use wildsift_common::asset::{AssetRecord, Decision};

#[derive(Debug, Default)]
pub struct ResultAggregator {
    keep: BTreeSet<String>,
    review: BTreeSet<String>,
    rows: Vec<AssetRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AssetRecord) {
        if record.decision.is_keep() {
            self.keep.insert(record.url.clone());
        } else {
            // Strong exclusions stay auditable here as well.
            self.review.insert(record.url.clone());
        }
        self.rows.push(record);
    }

    pub fn finish(self) -> Classification {
        let review = self.review;
        // A URL flagged in any row is never reported as confidently real.
        let final_urls = self
            .keep
            .into_iter()
            .filter(|url| !review.contains(url))
            .collect();

        Classification {
            final_urls,
            review_urls: review.into_iter().collect(),
            rows: self.rows,
        }
    }
}

impl Extend<AssetRecord> for ResultAggregator {
    fn extend<T: IntoIterator<Item = AssetRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

/// Outcome of one run. Both URL lists are sorted and free of duplicates.
#[derive(Debug, Default)]
pub struct Classification {
    pub final_urls: Vec<String>,
    pub review_urls: Vec<String>,
    /// Every classified record, in input order.
    pub rows: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionCounts {
    pub total: usize,
    pub keep: usize,
    pub review: usize,
    pub exclude_wildcard_strong: usize,
}

impl Classification {
    pub fn counts(&self) -> DecisionCounts {
        let mut counts = DecisionCounts {
            total: self.rows.len(),
            ..DecisionCounts::default()
        };
        for row in &self.rows {
            match row.decision {
                Decision::Keep => counts.keep += 1,
                Decision::Review => counts.review += 1,
                Decision::ExcludeWildcardStrong => counts.exclude_wildcard_strong += 1,
            }
        }
        counts
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
