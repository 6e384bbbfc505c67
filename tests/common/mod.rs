// tests/common/mod.rs
//
// In-memory page sources and scratch directories shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::{ json, Value };

use seoul_market::config::{ Config, RowLimit };
use seoul_market::error::PipelineError;
use seoul_market::fetch::{ PageSource, Record };

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("seoul_market_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn config(dir: &PathBuf, page_size: usize, limit: RowLimit) -> Config {
    let mut c = Config::default().with_key("test-key").with_data_dir(dir);
    c.api.page_size = page_size;
    c.fact_limit = limit;
    c
}

pub fn record(v: Value) -> Record {
    v.as_object().cloned().unwrap()
}

pub fn fact(code: Value, area: &str, industry: &str, stores: u64, opened: u64, closed: u64) -> Record {
    record(json!({
        "STDR_YYQU_CD": "20241",
        "TRDAR_CD": code,
        "TRDAR_CD_NM": area,
        "SVC_INDUTY_CD": "CS100010",
        "SVC_INDUTY_CD_NM": industry,
        "STOR_CO": stores,
        "OPBIZ_STOR_CO": opened,
        "CLSBIZ_STOR_CO": closed,
    }))
}

pub fn district(code: Value, signgu: &str) -> Record {
    record(json!({ "TRDAR_CD": code, "TRDAR_CD_NM": "area", "SIGNGU_CD_NM": signgu }))
}

/// `n` fact rows with distinct codes.
pub fn facts(n: usize) -> Vec<Record> {
    (0..n).map(|i| fact(json!(format!("{}", 3_110_000 + i)), "area", "커피-음료", 1, 0, 0)).collect()
}

/// Serves a fixed row list by 1-based inclusive range and records every request.
pub struct FakeSource {
    rows: Vec<Record>,
    pub calls: Vec<(usize, usize)>,
    /// Fail the request starting at this index.
    pub fail_at: Option<usize>,
}

impl FakeSource {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows, calls: Vec::new(), fail_at: None }
    }

    pub fn failing_at(mut self, start: usize) -> Self {
        self.fail_at = Some(start);
        self
    }
}

impl PageSource for FakeSource {
    fn fetch_page(&mut self, start: usize, end: usize) -> Result<Vec<Record>, PipelineError> {
        self.calls.push((start, end));
        if self.fail_at == Some(start) {
            return Err(PipelineError::Transport { start, end, reason: "HTTP 500".into() });
        }
        let lo = (start - 1).min(self.rows.len());
        let hi = end.min(self.rows.len());
        Ok(self.rows[lo..hi].to_vec())
    }
}
