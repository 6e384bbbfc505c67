// tests/join.rs
mod common;

use serde_json::json;

use common::{ config, district, fact, tmp_dir, FakeSource };
use seoul_market::collect::{ DistrictTable, StoreFactCollector };
use seoul_market::config::{ Config, RowLimit };
use seoul_market::data::RawData;
use seoul_market::error::PipelineError;
use seoul_market::preprocess::{ left_join, Preprocessor };
use seoul_market::store::load_dataset;

fn seed_facts(cfg: &Config) {
    let rows = vec![
        fact(json!("3110008"), "종로1가", "커피-음료", 5, 2, 1),
        fact(json!(3110009), "청진동", "커피-음료", 3, 1, 0),
        fact(json!("9999"), "어딘가", "한식음식점", 4, 0, 2),
    ];
    StoreFactCollector::new(cfg.clone()).collect_from(FakeSource::new(rows), None).unwrap();
}

#[test]
fn missing_fact_file_is_data_absent() {
    let dir = tmp_dir("join_no_facts");
    let cfg = config(&dir, 1000, RowLimit::Unbounded);

    let mut src = FakeSource::new(vec![district(json!("1"), "종로구")]);
    let err = Preprocessor::new(cfg.clone()).run_from(&mut src).unwrap_err();
    assert!(matches!(err, PipelineError::DataAbsent(_)));
    // districts are not fetched when there is nothing to join
    assert!(src.calls.is_empty());
    assert!(!cfg.final_path().exists());
}

#[test]
fn missing_key_fails_before_loading_facts() {
    let dir = tmp_dir("join_no_key");
    let cfg = Config::default().with_data_dir(&dir);
    let err = Preprocessor::new(cfg).run_from(FakeSource::new(Vec::new())).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[test]
fn empty_district_source_is_data_absent() {
    let dir = tmp_dir("join_no_districts");
    let cfg = config(&dir, 1000, RowLimit::Unbounded);
    seed_facts(&cfg);

    let err = Preprocessor::new(cfg.clone()).run_from(FakeSource::new(Vec::new())).unwrap_err();
    assert!(matches!(err, PipelineError::DataAbsent(_)));
    assert!(!cfg.final_path().exists());
}

#[test]
fn left_join_keeps_every_fact_row() {
    let dir = tmp_dir("join_full");
    let cfg = config(&dir, 2, RowLimit::Unbounded);
    seed_facts(&cfg);

    let districts = vec![
        district(json!("3110008"), "종로구"),
        district(json!("3110008"), "중구"),
        district(json!(3110009.0), "종로구"),
        district(json!("5555"), "강남구"),
    ];
    let report = Preprocessor::new(cfg.clone()).run_from(FakeSource::new(districts)).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.districts, 3);
    assert_eq!(report.unmatched, 1);

    let ds = load_dataset(&cfg.final_path()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.headers.last().map(String::as_str), Some("SIGNGU_CD_NM"));
    let name = ds.column_index("SIGNGU_CD_NM").unwrap();
    let names: Vec<&str> = ds.rows.iter().map(|r| r[name].as_str()).collect();
    // first-seen district wins; unmatched stays empty
    assert_eq!(names, vec!["종로구", "종로구", ""]);

    let raw = RawData::load(&cfg.final_path()).unwrap();
    assert_eq!(raw.districts(), vec!["Unknown", "종로구"]);
}

#[test]
fn existing_district_column_is_reused() {
    let mut facts = seoul_market::store::DataSet::new(
        ["TRDAR_CD", "TRDAR_CD_NM", "SVC_INDUTY_CD", "SVC_INDUTY_CD_NM", "STOR_CO", "OPBIZ_STOR_CO", "CLSBIZ_STOR_CO", "SIGNGU_CD_NM"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );
    facts.rows.push(
        ["1.0", "a", "c", "커피-음료", "1", "0", "0", "stale"].iter().map(|c| c.to_string()).collect(),
    );
    let table = DistrictTable::from_records(&[district(json!(1), "마포구")]);

    let (joined, unmatched) = left_join(&facts, &table).unwrap();
    assert_eq!(unmatched, 0);
    assert_eq!(joined.header_count(), 8);
    assert_eq!(joined.rows[0][0], "1");
    assert_eq!(joined.rows[0][7], "마포구");
}
