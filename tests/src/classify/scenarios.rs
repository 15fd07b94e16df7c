#![cfg(test)]
use wildsift_common::asset::{AssetRecord, Decision, MatchFlags};
use wildsift_common::config::MatchConfig;
use wildsift_core::engine::{self, RunOutcome};

use serde_json::json;

use crate::fixtures::{dns, http, parked_example_com, RunFixture};

const FOO: &str = "https://foo.example.com";

async fn run(fixture: &RunFixture) -> RunOutcome {
    engine::run(&fixture.inputs, &MatchConfig::default())
        .await
        .expect("run should succeed")
}

fn only_row(outcome: &RunOutcome) -> &AssetRecord {
    assert_eq!(outcome.classification.rows.len(), 1);
    &outcome.classification.rows[0]
}

/// Identical addresses and identical page: auto-excluded but still auditable.
#[tokio::test]
async fn scenario_a_strong_wildcard_is_excluded() {
    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["1.2.3.4"])])
        .httpx(&[http(FOO, 200, "Default Page", Some(1000), 512)]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    assert!(row.flags.dns_strict);
    assert!(row.flags.http_strong);
    assert_eq!(row.decision, Decision::ExcludeWildcardStrong);
    assert_eq!(outcome.classification.review_urls, vec![FOO]);
    assert!(outcome.classification.final_urls.is_empty());
}

/// Wildcard addresses but a different page: surfaced for review.
#[tokio::test]
async fn scenario_b_distinct_page_on_wildcard_ip_is_review() {
    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["1.2.3.4"])])
        .httpx(&[http(FOO, 200, "Login", Some(5000), 9000)]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    assert_eq!(
        row.flags,
        MatchFlags {
            dns_strict: true,
            dns_loose: true,
            http_strong: false,
            http_weak: false,
        }
    );
    assert_eq!(row.decision, Decision::Review);
    assert_eq!(outcome.classification.review_urls, vec![FOO]);
}

/// Own addresses and a different status: a real asset.
#[tokio::test]
async fn scenario_c_distinct_host_is_kept() {
    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["5.6.7.8"])])
        .httpx(&[http(FOO, 404, "Not Found", Some(77), 100)]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    assert_eq!(row.flags, MatchFlags::default());
    assert_eq!(row.decision, Decision::Keep);
    assert_eq!(outcome.classification.final_urls, vec![FOO]);
    assert!(outcome.classification.review_urls.is_empty());
}

/// Wildcard DNS without any wildcard HTTP probes: only the DNS signal counts.
#[tokio::test]
async fn scenario_d_dns_only_fingerprint() {
    let fixture = RunFixture::new("example.com\n")
        .wild_dns_a(&[dns("zz9yy8xx7.example.com", "a", &["1.2.3.4"])])
        .dns_a(&[
            dns("foo.example.com", "a", &["1.2.3.4"]),
            dns("bar.example.com", "a", &["8.8.8.8"]),
        ])
        .httpx(&[
            http(FOO, 200, "Default Page", Some(1000), 512),
            http("https://bar.example.com", 200, "Default Page", Some(1000), 512),
        ]);

    let outcome = run(&fixture).await;
    let rows = &outcome.classification.rows;
    assert_eq!(rows.len(), 2);

    for row in rows {
        assert!(!row.flags.http_strong);
        assert!(!row.flags.http_weak);
    }
    assert_eq!(rows[0].decision, Decision::Review);
    assert_eq!(rows[1].decision, Decision::Keep);
}

#[tokio::test]
async fn root_without_probes_gives_no_dns_signal() {
    let fixture = RunFixture::new("example.com\nexample.org\n")
        .wild_dns_a(&[dns("abc.example.com", "a", &["1.2.3.4"])])
        .dns_a(&[dns("www.example.org", "a", &["1.2.3.4"])])
        .httpx(&[http("https://www.example.org", 200, "Home", None, 100)]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    assert!(!row.flags.dns_strict);
    assert!(!row.flags.dns_loose);
    assert_eq!(row.decision, Decision::Keep);
}

#[tokio::test]
async fn loose_dns_overlap_on_load_balanced_wildcard() {
    let fixture = RunFixture::new("example.com\n")
        .wild_dns_a(&[
            dns("r1.example.com", "a", &["10.0.0.1", "10.0.0.2"]),
            dns("r2.example.com", "a", &["10.0.0.3"]),
        ])
        .dns_a(&[dns("shop.example.com", "a", &["10.0.0.2"])])
        .httpx(&[http("https://shop.example.com", 200, "Shop", Some(1), 4000)]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    assert!(!row.flags.dns_strict);
    assert!(row.flags.dns_loose);
    assert_eq!(row.decision, Decision::Review);
}

#[tokio::test]
async fn ipv6_answers_join_the_host_address_set() {
    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["1.2.3.4"])])
        .dns_aaaa(&[dns("foo.example.com", "aaaa", &["2001:db8::1"])])
        .httpx(&[http(FOO, 200, "Default Page", Some(1000), 512)]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    // The extra AAAA address keeps the host out of the wildcard set entirely.
    assert!(!row.flags.dns_strict);
    assert!(!row.flags.dns_loose);
    assert!(row.flags.http_strong);
    assert_eq!(row.decision, Decision::Review);
}

/// Wildcard A and AAAA answers together form the root's address set.
#[tokio::test]
async fn dual_stack_wildcard_needs_both_families_for_strict() {
    let fixture = parked_example_com()
        .wild_dns_aaaa(&[dns("k2j3h4g5f6d7s8a9q0.example.com", "aaaa", &["2001:db8::53"])])
        .dns_a(&[
            dns("foo.example.com", "a", &["1.2.3.4"]),
            dns("bar.example.com", "a", &["1.2.3.4"]),
        ])
        .dns_aaaa(&[dns("foo.example.com", "aaaa", &["2001:db8::53"])])
        .httpx(&[
            http(FOO, 200, "Default Page", Some(1000), 512),
            http("https://bar.example.com", 200, "Default Page", Some(1000), 512),
        ]);

    let outcome = run(&fixture).await;
    let rows = &outcome.classification.rows;
    assert_eq!(rows.len(), 2);

    assert!(rows[0].flags.dns_strict);
    assert_eq!(rows[0].decision, Decision::ExcludeWildcardStrong);

    // Only the A half of the wildcard set: contained, not equal.
    assert!(!rows[1].flags.dns_strict);
    assert!(rows[1].flags.dns_loose);
    assert_eq!(rows[1].decision, Decision::Review);

    assert_eq!(outcome.summary.roots_with_wildcard_dns, 1);
}

#[tokio::test]
async fn explicit_host_with_port_still_resolves_its_root() {
    let mut record = http("https://foo.example.com:8443/", 200, "Default Page", Some(1000), 512);
    record["host"] = json!("Foo.Example.com:8443");

    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["1.2.3.4"])])
        .httpx(&[record]);

    let outcome = run(&fixture).await;
    let row = only_row(&outcome);

    assert_eq!(row.host, "foo.example.com");
    assert_eq!(row.decision, Decision::ExcludeWildcardStrong);
}
