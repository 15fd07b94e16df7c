//! # Report Printing
//!
//! Everything the commands show besides log lines. Output goes through `tracing`
//! under [`PRINT_TARGET`] so it shares the spinner-aware writer with the logs.
//!
//! The quiet level is set once at startup. Level 1 hides the banner, headers and
//! trees; level 2 also hides key/value lines and leaves only the closing summary.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;
use wildsift_common::asset::{Decision, HttpSignature};
use wildsift_core::aggregate::DecisionCounts;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "wildsift::print";

static QUIET: AtomicU8 = AtomicU8::new(0);

thread_local! {
    static KEY_WIDTH: Cell<usize> = const { Cell::new(0) }
}

/// One `key: value` row of a tree.
pub type Detail = (String, ColoredString);

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn set_quiet(level: u8) {
    QUIET.store(level, Ordering::Relaxed);
}

fn quiet() -> u8 {
    QUIET.load(Ordering::Relaxed)
}

/// Prints regardless of the quiet level.
pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

/// Prints only when nothing is being suppressed.
fn verbose(msg: &str) {
    if quiet() == 0 {
        print(msg);
    }
}

// ── Framing ─────────────────────────────────────────────────────────────────

pub fn banner(no_banner: bool) {
    if no_banner {
        return;
    }

    let title: String = format!("⟦ WILDSIFT v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let pad: usize = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(title.as_str())) / 2;
    let rule: ColoredString = "═".repeat(pad).color(colors::SEPARATOR);
    verbose(&format!("{rule}{}{rule}", title.color(colors::PRIMARY).bold()));
}

pub fn header(msg: &str) {
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let dashes: usize = TOTAL_WIDTH.saturating_sub(title.chars().count());
    let left: String = "─".repeat(dashes / 2);
    let right: String = "─".repeat(dashes - dashes / 2);

    verbose(&format!(
        "{}{}{}",
        left.color(colors::SEPARATOR),
        title.color(colors::PRIMARY),
        right.color(colors::SEPARATOR)
    ));
}

pub fn separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn centerln(msg: &str) {
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}"));
}

// ── Key/value lines ─────────────────────────────────────────────────────────

/// Aligns every following [`aligned_line`] on the widest of `keys`.
pub fn set_key_width(keys: &[&str]) {
    KEY_WIDTH.set(keys.iter().map(|k| k.len()).max().unwrap_or(0));
}

pub fn aligned_line(key: &str, value: ColoredString) {
    if quiet() > 1 {
        return;
    }
    let dots: String = ".".repeat((KEY_WIDTH.get() + 1).saturating_sub(key.len()));
    print_status(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

pub fn path_line(key: &str, path: &Path) {
    aligned_line(key, path.display().to_string().color(colors::TEXT_DEFAULT));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    print(&format!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

// ── Trees ───────────────────────────────────────────────────────────────────

pub fn tree_head(idx: usize, name: &str) {
    verbose(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn tree(details: &[Detail]) {
    let key_width: usize = details.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (i, (key, value)) in details.iter().enumerate() {
        let branch: &str = if i + 1 == details.len() { "└─" } else { "├─" };
        let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
        verbose(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn ip_details(ips: &BTreeSet<IpAddr>) -> Vec<Detail> {
    ips.iter()
        .map(|ip| match ip {
            IpAddr::V4(v4) => ("IPv4".to_string(), v4.to_string().color(colors::IPV4_ADDR)),
            IpAddr::V6(v6) => ("IPv6".to_string(), v6.to_string().color(colors::IPV6_ADDR)),
        })
        .collect()
}

pub fn signature_details(sig: &HttpSignature) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![("Status".to_string(), sig.status_code.to_string().normal())];
    if !sig.title.is_empty() {
        details.push(("Title".to_string(), sig.title.clone().normal()));
    }
    if !sig.location.is_empty() {
        details.push(("Location".to_string(), sig.location.clone().normal()));
    }
    let simhash: ColoredString = match sig.simhash {
        Some(hash) => hash.to_string().normal(),
        None => "none".dimmed(),
    };
    details.push(("Simhash".to_string(), simhash));
    details.push(("Length".to_string(), sig.content_length.to_string().normal()));
    details
}

/// A root's wildcard answers as one numbered tree.
pub fn fingerprint_tree(idx: usize, root: &str, ips: &BTreeSet<IpAddr>, sig: Option<&HttpSignature>) {
    tree_head(idx, root);
    let mut details: Vec<Detail> = ip_details(ips);
    if let Some(sig) = sig {
        details.extend(signature_details(sig));
    }
    tree(&details);
}

/// Count rows such as `Old: 12`, `New: 15`, `Added: +3`.
pub fn count_details(rows: &[(&str, String, Color)]) -> Vec<Detail> {
    rows.iter()
        .map(|(key, value, color)| (key.to_string(), value.color(*color)))
        .collect()
}

// ── Decisions ───────────────────────────────────────────────────────────────

pub fn decision(decision: Decision) -> ColoredString {
    let color: Color = match decision {
        Decision::Keep => colors::KEEP,
        Decision::Review => colors::REVIEW,
        Decision::ExcludeWildcardStrong => colors::EXCLUDED,
    };
    decision.as_str().color(color).bold()
}

/// `N assets in Ts: a KEEP, b REVIEW, c EXCLUDE_WILDCARD_STRONG`
pub fn decision_summary(counts: &DecisionCounts, seconds: f64) -> String {
    let tally = [
        (counts.keep, Decision::Keep),
        (counts.review, Decision::Review),
        (counts.exclude_wildcard_strong, Decision::ExcludeWildcardStrong),
    ]
    .iter()
    .map(|(n, d)| format!("{n} {}", decision(*d)))
    .collect::<Vec<String>>()
    .join(", ");

    format!(
        "{} in {}: {tally}",
        format!("{} assets", counts.total).color(colors::PRIMARY),
        format!("{seconds:.2}s").bold().yellow()
    )
}

/// Closes a run: a framed, centered line normally, the bare line when quiet.
pub fn closing_line(msg: &str) {
    if quiet() == 0 {
        separator();
        centerln(msg);
    } else {
        print(msg);
    }
}

pub fn no_results(what: &str) {
    verbose(&format!("No {what}.").red().bold().to_string());
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
