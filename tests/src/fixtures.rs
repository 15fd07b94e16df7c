#![cfg(test)]
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;
use wildsift_core::engine::RunInputs;

/// A run directory with a domains file and any number of JSONL streams.
pub struct RunFixture {
    pub dir: TempDir,
    pub inputs: RunInputs,
}

impl RunFixture {
    pub fn new(domains: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let domains_path = dir.path().join("domains.txt");
        std::fs::write(&domains_path, domains).unwrap();
        let inputs = RunInputs {
            domains: domains_path,
            ..RunInputs::default()
        };
        Self { dir, inputs }
    }

    pub fn outdir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn stream(&self, name: &str, records: &[Value]) -> Option<PathBuf> {
        let path = self.dir.path().join(name);
        let body: String = records.iter().map(|r| format!("{r}\n")).collect();
        std::fs::write(&path, body).unwrap();
        Some(path)
    }

    pub fn dns_a(mut self, records: &[Value]) -> Self {
        self.inputs.dns_a = self.stream("dns.A.jsonl", records);
        self
    }

    pub fn dns_aaaa(mut self, records: &[Value]) -> Self {
        self.inputs.dns_aaaa = self.stream("dns.AAAA.jsonl", records);
        self
    }

    pub fn wild_dns_a(mut self, records: &[Value]) -> Self {
        self.inputs.wild_dns_a = self.stream("wild.dns.A.jsonl", records);
        self
    }

    pub fn wild_dns_aaaa(mut self, records: &[Value]) -> Self {
        self.inputs.wild_dns_aaaa = self.stream("wild.dns.AAAA.jsonl", records);
        self
    }

    pub fn wild_httpx(mut self, records: &[Value]) -> Self {
        self.inputs.wild_httpx = self.stream("wild.httpx.jsonl", records);
        self
    }

    pub fn httpx(mut self, records: &[Value]) -> Self {
        self.inputs.httpx = self.stream("httpx.jsonl", records);
        self
    }

    /// Appends raw text to an already written stream.
    pub fn append_raw(&self, path: &Path, text: &str) {
        let mut body = std::fs::read_to_string(path).unwrap();
        body.push_str(text);
        std::fs::write(path, body).unwrap();
    }
}

pub fn http(url: &str, status: u16, title: &str, hash: Option<u64>, length: u64) -> Value {
    let mut record = json!({
        "url": url,
        "status_code": status,
        "title": title,
        "location": "",
        "content_length": length,
    });
    if let Some(hash) = hash {
        record["hash"] = json!(hash.to_string());
    }
    record
}

pub fn dns(host: &str, key: &str, ips: &[&str]) -> Value {
    let mut record = json!({ "host": host });
    record[key] = json!(ips);
    record
}

/// Root `example.com` whose random names resolve to 1.2.3.4 and serve a parked page.
pub fn parked_example_com() -> RunFixture {
    RunFixture::new("example.com\n")
        .wild_dns_a(&[
            dns("k2j3h4g5f6d7s8a9q0.example.com", "a", &["1.2.3.4"]),
            dns("p0o9i8u7y6t5r4e3w2.example.com", "a", &["1.2.3.4"]),
        ])
        .wild_httpx(&[
            http("https://k2j3h4g5f6d7s8a9q0.example.com", 200, "Default Page", Some(1000), 512),
            http("https://p0o9i8u7y6t5r4e3w2.example.com", 200, "Default Page", Some(1000), 512),
        ])
}
