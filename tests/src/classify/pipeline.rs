#![cfg(test)]
use std::collections::BTreeSet;

use wildsift_common::config::MatchConfig;
use wildsift_core::engine;
use wildsift_core::output::{self, AUDIT_FILE, FINAL_URLS_FILE, REVIEW_URLS_FILE, SUMMARY_FILE};

use crate::fixtures::{dns, http, parked_example_com, RunFixture};

fn mixed_run() -> RunFixture {
    parked_example_com()
        .dns_a(&[
            dns("foo.example.com", "a", &["1.2.3.4"]),
            dns("login.example.com", "a", &["1.2.3.4"]),
            dns("api.example.com", "a", &["9.9.9.9"]),
        ])
        .httpx(&[
            http("https://foo.example.com", 200, "Default Page", Some(1000), 512),
            http("https://login.example.com", 200, "Login", Some(5000), 9000),
            http("https://api.example.com", 401, "", None, 20),
            http("https://api.example.com", 401, "", None, 20),
            http("https://outside.example.net", 200, "Elsewhere", None, 10),
        ])
}

#[tokio::test]
async fn every_url_lands_in_exactly_one_list() {
    let fixture = mixed_run();
    let outcome = engine::run(&fixture.inputs, &MatchConfig::default()).await.unwrap();
    let classification = &outcome.classification;

    let final_urls: BTreeSet<&String> = classification.final_urls.iter().collect();
    let review_urls: BTreeSet<&String> = classification.review_urls.iter().collect();
    assert!(final_urls.is_disjoint(&review_urls));

    let every_url: BTreeSet<&String> = classification.rows.iter().map(|r| &r.url).collect();
    let union: BTreeSet<&String> = final_urls.union(&review_urls).copied().collect();
    assert_eq!(every_url, union);

    assert_eq!(
        classification.final_urls,
        vec!["https://api.example.com", "https://outside.example.net"]
    );
    assert_eq!(
        classification.review_urls,
        vec!["https://foo.example.com", "https://login.example.com"]
    );
}

#[tokio::test]
async fn outputs_are_written() -> anyhow::Result<()> {
    let fixture = mixed_run();
    let outcome = engine::run(&fixture.inputs, &MatchConfig::default()).await?;
    let outdir = fixture.outdir();
    output::write_outputs(&outdir, &outcome).await?;

    let final_urls = std::fs::read_to_string(outdir.join(FINAL_URLS_FILE))?;
    assert_eq!(final_urls, "https://api.example.com\nhttps://outside.example.net\n");

    let review = std::fs::read_to_string(outdir.join(REVIEW_URLS_FILE))?;
    assert_eq!(review, "https://foo.example.com\nhttps://login.example.com\n");

    let audit = std::fs::read_to_string(outdir.join(AUDIT_FILE))?;
    let lines: Vec<&str> = audit.lines().collect();
    assert_eq!(lines.len(), 1 + 5);
    assert!(lines[1].ends_with("\tYES\tYES\tYES\tNO\tEXCLUDE_WILDCARD_STRONG"));
    assert!(lines[2].ends_with("\tREVIEW"));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(outdir.join(SUMMARY_FILE))?)?;
    assert_eq!(summary["decisions"]["total"], 5);
    assert_eq!(summary["decisions"]["keep"], 3);
    assert_eq!(summary["decisions"]["exclude_wildcard_strong"], 1);
    assert_eq!(summary["roots_with_wildcard_http"], 1);
    Ok(())
}

#[tokio::test]
async fn malformed_lines_and_missing_streams_are_soft_failures() {
    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["1.2.3.4"])])
        .httpx(&[http("https://foo.example.com", 200, "Default Page", Some(1000), 512)]);
    let httpx = fixture.inputs.httpx.clone().unwrap();
    fixture.append_raw(&httpx, "{not json at all\n\n{\"status_code\": 200}\n");

    let mut inputs = fixture.inputs.clone();
    inputs.dns_aaaa = Some(fixture.dir.path().join("never-written.jsonl"));

    let outcome = engine::run(&inputs, &MatchConfig::default()).await.unwrap();
    assert_eq!(outcome.classification.rows.len(), 1);
}

#[tokio::test]
async fn empty_domains_file_aborts_before_writing() {
    let fixture = RunFixture::new("# nothing tracked yet\n\n")
        .httpx(&[http("https://foo.example.com", 200, "x", None, 1)]);

    let err = engine::run(&fixture.inputs, &MatchConfig::default())
        .await
        .err()
        .unwrap();
    assert!(err.is_fatal());
    assert!(!fixture.outdir().exists());
}

#[tokio::test]
async fn looser_thresholds_change_the_verdict() {
    let fixture = parked_example_com()
        .dns_a(&[dns("foo.example.com", "a", &["1.2.3.4"])])
        .httpx(&[http("https://foo.example.com", 200, "Default Page", Some(1000 ^ 0xff), 512)]);

    let default = engine::run(&fixture.inputs, &MatchConfig::default()).await.unwrap();
    assert_eq!(default.summary.decisions.review, 1);

    let loose = MatchConfig {
        simhash_max_distance: 8,
        ..MatchConfig::default()
    };
    let loose = engine::run(&fixture.inputs, &loose).await.unwrap();
    assert_eq!(loose.summary.decisions.exclude_wildcard_strong, 1);
}
