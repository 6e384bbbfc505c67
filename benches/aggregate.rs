// benches/aggregate.rs
use std::collections::BTreeSet;

use criterion::{ black_box, criterion_group, criterion_main, Criterion };

use seoul_market::collect::DistrictTable;
use seoul_market::data::{ MarketRow, RawData, Selection, SelectionView };
use seoul_market::preprocess::left_join;
use seoul_market::schema::DimensionRecord;
use seoul_market::store::DataSet;

const DISTRICTS: [&str; 5] = ["강남구", "마포구", "종로구", "송파구", "중구"];
const INDUSTRIES: [&str; 4] = ["커피-음료", "한식음식점", "편의점", "분식전문점"];

fn synthetic_rows(n: usize) -> RawData {
    let rows = (0..n)
        .map(|i| MarketRow {
            area_name: format!("area {i}"),
            signgu: DISTRICTS[i % DISTRICTS.len()].to_string(),
            industry: INDUSTRIES[i % INDUSTRIES.len()].to_string(),
            stores: (i % 17) as u64,
            opened: (i % 5) as u64,
            closed: (i % 3) as u64,
        })
        .collect();
    RawData::from_rows(rows)
}

fn synthetic_facts(n: usize) -> (DataSet, DistrictTable) {
    let headers = ["TRDAR_CD", "TRDAR_CD_NM", "SVC_INDUTY_CD", "SVC_INDUTY_CD_NM", "STOR_CO", "OPBIZ_STOR_CO", "CLSBIZ_STOR_CO"];
    let mut ds = DataSet::new(headers.iter().map(|h| h.to_string()).collect());
    ds.rows = (0..n)
        .map(|i| vec![
            format!("{}", 3_110_000 + i % 1600),
            format!("area {i}"),
            "CS100010".into(),
            "커피-음료".into(),
            "3".into(),
            "1".into(),
            "0".into(),
        ])
        .collect();

    let mut table = DistrictTable::default();
    for c in 0..1500 {
        table.insert(DimensionRecord {
            district_code: format!("{}", 3_110_000 + c),
            signgu_name: DISTRICTS[c % DISTRICTS.len()].to_string(),
        });
    }
    (ds, table)
}

fn bench_aggregate(c: &mut Criterion) {
    let raw = synthetic_rows(100_000);
    let two = ["강남구", "마포구"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();

    c.bench_function("filter_and_group", |b| {
        b.iter(|| {
            let view = SelectionView::from_raw(black_box(&raw), Selection::new("커피-음료", &two));
            black_box((view.totals(), view.by_district().len()))
        })
    });

    let (facts, table) = synthetic_facts(50_000);
    c.bench_function("left_join", |b| {
        b.iter(|| {
            let (joined, unmatched) = left_join(black_box(&facts), black_box(&table)).unwrap();
            black_box((joined.row_count(), unmatched))
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
