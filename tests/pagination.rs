// tests/pagination.rs
mod common;

use common::{ facts, FakeSource };
use seoul_market::config::RowLimit;
use seoul_market::error::PipelineError;
use seoul_market::fetch::{ Paginator, StopReason };

fn expected(available: usize, limit: usize, page: usize) -> usize {
    available.min(limit.div_ceil(page) * page)
}

#[test]
fn limit_overshoots_to_the_page_boundary() {
    for (available, limit) in [(5000, 2500), (5000, 3000), (1200, 5000), (5000, 1)] {
        let mut src = FakeSource::new(facts(available));
        let got = Paginator::new(&mut src, 1000, RowLimit::AtLeast(limit)).collect_all();
        assert_eq!(got.records.len(), expected(available, limit, 1000), "available={available} limit={limit}");
    }
}

#[test]
fn ranges_are_one_based_and_inclusive() {
    let mut src = FakeSource::new(facts(2500));
    let got = Paginator::new(&mut src, 1000, RowLimit::Unbounded).collect_all();
    assert_eq!(got.records.len(), 2500);
    assert_eq!(src.calls, vec![(1, 1000), (1001, 2000), (2001, 3000)]);
    assert!(matches!(got.stop, StopReason::LastPage));
}

#[test]
fn exact_multiple_stops_on_empty_page() {
    let mut src = FakeSource::new(facts(2000));
    let got = Paginator::new(&mut src, 1000, RowLimit::Unbounded).collect_all();
    assert_eq!(got.records.len(), 2000);
    assert_eq!(src.calls.len(), 3);
    assert!(matches!(got.stop, StopReason::Exhausted));
}

#[test]
fn limit_is_checked_before_requesting() {
    let mut src = FakeSource::new(facts(5000));
    let got = Paginator::new(&mut src, 1000, RowLimit::AtLeast(2000)).collect_all();
    assert_eq!(got.records.len(), 2000);
    assert_eq!(src.calls.len(), 2);
    assert!(matches!(got.stop, StopReason::LimitReached));
}

#[test]
fn empty_first_page_yields_nothing() {
    let mut src = FakeSource::new(Vec::new());
    let got = Paginator::new(&mut src, 1000, RowLimit::AtLeast(20_000)).collect_all();
    assert!(got.records.is_empty());
    assert_eq!(src.calls, vec![(1, 1000)]);
    assert!(matches!(got.stop, StopReason::Exhausted));
}

#[test]
fn failure_keeps_rows_already_fetched() {
    let mut src = FakeSource::new(facts(3000)).failing_at(1001);
    let got = Paginator::new(&mut src, 1000, RowLimit::Unbounded).collect_all();
    assert_eq!(got.records.len(), 1000);
    assert!(matches!(got.stop, StopReason::Aborted(PipelineError::Transport { start: 1001, .. })));
    // no retry
    assert_eq!(src.calls.len(), 2);
}

#[test]
fn iterator_is_lazy() {
    let mut src = FakeSource::new(facts(3000));
    let mut pages = Paginator::new(&mut src, 1000, RowLimit::Unbounded);
    assert!(pages.next().is_some());
    assert_eq!(pages.fetched(), 1000);
    assert!(pages.stop_reason().is_none());
    drop(pages);
    assert_eq!(src.calls.len(), 1);
}

#[test]
fn zero_limit_means_all() {
    assert_eq!(RowLimit::from_option(Some(0)), RowLimit::Unbounded);
    let mut src = FakeSource::new(facts(1500));
    let got = Paginator::new(&mut src, 1000, RowLimit::from_option(Some(0))).collect_all();
    assert_eq!(got.records.len(), 1500);
}

#[derive(Default)]
struct Counter {
    target: Option<usize>,
    pages: Vec<usize>,
    finished: Option<usize>,
}

impl seoul_market::progress::Progress for Counter {
    fn begin(&mut self, target: Option<usize>) { self.target = target; }
    fn page_done(&mut self, _start: usize, fetched: usize) { self.pages.push(fetched); }
    fn finish(&mut self, fetched: usize) { self.finished = Some(fetched); }
}

#[test]
fn progress_sees_every_page() {
    let mut src = FakeSource::new(facts(2300));
    let mut counter = Counter::default();
    let got = Paginator::new(&mut src, 1000, RowLimit::AtLeast(5000))
        .with_progress(Some(&mut counter))
        .collect_all();

    assert_eq!(got.records.len(), 2300);
    assert_eq!(counter.target, Some(5000));
    assert_eq!(counter.pages, vec![1000, 2000, 2300]);
    assert_eq!(counter.finished, Some(2300));
}

#[test]
fn null_progress_is_silent() {
    let mut src = FakeSource::new(facts(10));
    let mut sink = seoul_market::progress::NullProgress;
    let got = Paginator::new(&mut src, 1000, RowLimit::Unbounded)
        .with_progress(Some(&mut sink))
        .collect_all();
    assert_eq!(got.records.len(), 10);
}
