//! # Wildsift Core
//!
//! Wildcard detection and asset classification for subdomain enumeration output.
//!
//! Data flows one way: DNS and wildcard-probe streams feed the
//! [`fingerprint`] builders, real HTTP records are checked against those
//! fingerprints by the [`compare`] stage, [`classify`] turns the evidence into a
//! decision and [`aggregate`] partitions the results.
//!
//! The [`engine`] module runs the whole pipeline. [`diff`] and [`stats`] look at
//! finished run directories instead.

pub mod aggregate;
pub mod classify;
pub mod compare;
pub mod diff;
pub mod engine;
pub mod fingerprint;
pub mod ingest;
pub mod output;
pub mod probes;
pub mod roots;
pub mod stats;
