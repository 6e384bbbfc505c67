// tests/selection_view.rs
//
// Filtering and aggregation over the final table, without any UI.
use std::collections::BTreeSet;

use seoul_market::cli::render_summary;
use seoul_market::data::{ melt, AggregateRow, MarketRow, RawData, Selection, SelectionView, Status, Totals };

fn row(signgu: &str, industry: &str, stores: u64, opened: u64, closed: u64) -> MarketRow {
    MarketRow {
        area_name: format!("{signgu} area"),
        signgu: signgu.into(),
        industry: industry.into(),
        stores,
        opened,
        closed,
    }
}

fn sample() -> RawData {
    RawData::from_rows(vec![
        row("강남구", "커피-음료", 10, 5, 2),
        row("강남구", "커피-음료", 7, 3, 1),
        row("마포구", "커피-음료", 4, 1, 1),
        row("마포구", "한식음식점", 9, 2, 0),
        row("Unknown", "커피-음료", 2, 0, 1),
    ])
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn district_sums_add_up() {
    let raw = sample();
    let districts = set(&["강남구"]);
    let view = SelectionView::from_raw(&raw, Selection::new("커피-음료", &districts));

    assert_eq!(view.len(), 2);
    assert_eq!(view.totals(), Totals { stores: 17, opened: 8, closed: 3 });
    assert_eq!(view.by_district(), vec![AggregateRow { signgu: "강남구".into(), opened: 8, closed: 3 }]);
}

#[test]
fn no_districts_means_all() {
    let raw = sample();
    let none = BTreeSet::new();
    let view = SelectionView::from_raw(&raw, Selection::new("커피-음료", &none));

    assert_eq!(view.len(), 4);
    assert_eq!(view.len(), raw.rows().iter().filter(|r| r.industry == "커피-음료").count());
    let names: Vec<String> = view.by_district().into_iter().map(|g| g.signgu).collect();
    assert_eq!(names, vec!["Unknown", "강남구", "마포구"]);
}

#[test]
fn empty_selection_yields_empty_aggregates() {
    let raw = sample();
    let districts = set(&["종로구"]);
    let view = SelectionView::from_raw(&raw, Selection::new("커피-음료", &districts));

    assert!(view.is_empty());
    assert_eq!(view.totals(), Totals::default());
    assert!(view.by_district().is_empty());
    assert!(render_summary("커피-음료", &view).contains("No data matches the selected filters."));
}

#[test]
fn industry_match_is_exact() {
    let raw = sample();
    let none = BTreeSet::new();
    assert!(SelectionView::from_raw(&raw, Selection::new("커피", &none)).is_empty());
}

#[test]
fn default_industry_prefers_coffee() {
    assert_eq!(sample().default_industry().as_deref(), Some("커피-음료"));

    let raw = RawData::from_rows(vec![row("마포구", "한식음식점", 1, 0, 0), row("마포구", "분식", 1, 0, 0)]);
    assert_eq!(raw.default_industry().as_deref(), Some("분식"));
    assert_eq!(RawData::default().default_industry(), None);
}

#[test]
fn melt_lists_opened_then_closed() {
    let groups = vec![
        AggregateRow { signgu: "강남구".into(), opened: 8, closed: 3 },
        AggregateRow { signgu: "마포구".into(), opened: 1, closed: 1 },
    ];
    let long = melt(&groups);
    assert_eq!(long.len(), 4);
    assert_eq!(long[0].status, Status::Opened);
    assert_eq!(long[1].signgu, "마포구");
    assert_eq!(long[2].status, Status::Closed);
    assert_eq!(long[2].count, 3);
}

#[test]
fn display_rows_follow_raw_view_columns() {
    let raw = sample();
    let districts = set(&["마포구"]);
    let view = SelectionView::from_raw(&raw, Selection::new("한식음식점", &districts));
    assert_eq!(view.display_rows(), vec![vec!["마포구 area", "마포구", "9", "2", "0"]]);
}

#[test]
fn summary_lists_each_district() {
    let raw = sample();
    let none = BTreeSet::new();
    let view = SelectionView::from_raw(&raw, Selection::new("커피-음료", &none));
    let text = render_summary("커피-음료", &view);

    assert!(text.contains("Total stores: 23"));
    assert!(text.contains("Opened: 9"));
    assert!(text.contains("Closed: 5"));
    assert_eq!(text.lines().filter(|l| l.starts_with("강남구")).count(), 1);
}
