//! # Wildcard Fingerprints
//!
//! Builders accumulate observations while input streams are ingested and are then
//! consumed by `finish()` into read-only fingerprints used during classification.
//!
//! Both builders only ever merge (set union, counter increment), so the order in
//! which records arrive does not change the DNS result, and only breaks ties in
//! the HTTP mode.

mod dns;
mod http;

pub use dns::{DnsFingerprintBuilder, DnsFingerprints};
pub use http::{HttpFingerprintBuilder, HttpFingerprints};
