// src/data.rs
//
// Read-side wrappers around the final joined table.
//
// - RawData: the joined artifact as typed rows, loaded once. Missing district
//            and industry names are replaced with "Unknown" here, at load time,
//            so they group like any other label.
// - Selection: the active filter (one industry, optional set of districts).
// - SelectionView: indices of rows passing the filter, plus the aggregations
//                  the dashboard shows. Recomputed on every filter change.

use std::collections::{ BTreeMap, BTreeSet };
use std::path::Path;

use crate::config::consts::{ PREFERRED_INDUSTRY, UNKNOWN_LABEL };
use crate::core::sanitize::label_or;
use crate::error::PipelineError;
use crate::schema::{ JoinedColumns, JoinedRecord, CLSBIZ_STOR_CO, OPBIZ_STOR_CO, SIGNGU_CD_NM, STOR_CO, TRDAR_CD_NM };
use crate::store;

/// One dashboard row. District and industry are never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketRow {
    pub area_name: String,
    pub signgu: String,
    pub industry: String,
    pub stores: u64,
    pub opened: u64,
    pub closed: u64,
}

impl From<JoinedRecord> for MarketRow {
    fn from(rec: JoinedRecord) -> Self {
        Self {
            area_name: rec.fact.district_name,
            signgu: label_or(rec.signgu_name.as_deref().unwrap_or(""), UNKNOWN_LABEL),
            industry: label_or(&rec.fact.industry_name, UNKNOWN_LABEL),
            stores: rec.fact.stores,
            opened: rec.fact.opened,
            closed: rec.fact.closed,
        }
    }
}

/// Authoritative, read-only copy of the final table.
#[derive(Clone, Debug, Default)]
pub struct RawData {
    rows: Vec<MarketRow>,
}

impl RawData {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::DataAbsent(format!(
                "{} not found; run collect and preprocess first",
                path.display()
            )));
        }
        let ds = store::load_dataset(path)?;
        let origin = path.display().to_string();
        let cols = JoinedColumns::resolve(&ds, &origin)?;

        let rows = (0..ds.row_count())
            .map(|i| cols.record(&ds, i, &origin).map(MarketRow::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<MarketRow>) -> Self { Self { rows } }

    pub fn rows(&self) -> &[MarketRow] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Distinct industry names, sorted.
    pub fn industries(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.industry.clone()).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Distinct administrative districts, sorted ("Unknown" included if present).
    pub fn districts(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.signgu.clone()).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// First industry mentioning coffee, else the first one.
    pub fn default_industry(&self) -> Option<String> {
        let list = self.industries();
        list.iter()
            .find(|i| i.contains(PREFERRED_INDUSTRY))
            .or_else(|| list.first())
            .cloned()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    /// Exact industry match, required.
    pub industry: &'a str,
    /// Empty means every district.
    pub districts: &'a BTreeSet<String>,
}

impl<'a> Selection<'a> {
    pub fn new(industry: &'a str, districts: &'a BTreeSet<String>) -> Self {
        Self { industry, districts }
    }

    #[inline]
    pub fn matches(&self, row: &MarketRow) -> bool {
        row.industry == self.industry
            && (self.districts.is_empty() || self.districts.contains(&row.signgu))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub stores: u64,
    pub opened: u64,
    pub closed: u64,
}

/// Per-district sums for the comparison chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateRow {
    pub signgu: String,
    pub opened: u64,
    pub closed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Opened,
    Closed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Opened => "Opened",
            Status::Closed => "Closed",
        }
    }
}

/// Long form of [`AggregateRow`]: one entry per (district, status).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusCount {
    pub signgu: String,
    pub status: Status,
    pub count: u64,
}

/// Unpivot per-district sums for grouped bar charts. Opened precedes Closed.
pub fn melt(rows: &[AggregateRow]) -> Vec<StatusCount> {
    let mut out = Vec::with_capacity(rows.len() * 2);
    for status in [Status::Opened, Status::Closed] {
        for r in rows {
            let count = match status { Status::Opened => r.opened, Status::Closed => r.closed };
            out.push(StatusCount { signgu: r.signgu.clone(), status, count });
        }
    }
    out
}

/// Columns shown in the raw-row table.
pub const RAW_VIEW_HEADERS: [&str; 5] = [TRDAR_CD_NM, SIGNGU_CD_NM, STOR_CO, OPBIZ_STOR_CO, CLSBIZ_STOR_CO];

/// Filtered view for display. Holds row indexes into RawData.
#[derive(Clone, Debug)]
pub struct SelectionView<'a> {
    /// Positions of kept rows in the raw dataset
    pub row_ix: Vec<usize>,
    raw: &'a RawData,
}

impl<'a> SelectionView<'a> {
    pub fn from_raw(raw: &'a RawData, sel: Selection<'_>) -> Self {
        let row_ix = raw.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| sel.matches(r))
            .map(|(i, _)| i)
            .collect();
        Self { row_ix, raw }
    }

    /// Build a view directly from precomputed indices (cache hit path).
    pub fn from_indices(raw: &'a RawData, row_ix: Vec<usize>) -> Self {
        Self { row_ix, raw }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &'a MarketRow> + '_ {
        let raw = self.raw;
        self.row_ix.iter().map(move |&ix| &raw.rows[ix])
    }

    /// Grand totals over the filtered rows.
    pub fn totals(&self) -> Totals {
        self.iter().fold(Totals::default(), |mut t, r| {
            t.stores += r.stores;
            t.opened += r.opened;
            t.closed += r.closed;
            t
        })
    }

    /// Opened/closed sums per district, sorted by district name.
    /// Empty when nothing passes the filter.
    pub fn by_district(&self) -> Vec<AggregateRow> {
        let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for r in self.iter() {
            let e = groups.entry(r.signgu.as_str()).or_default();
            e.0 += r.opened;
            e.1 += r.closed;
        }
        groups
            .into_iter()
            .map(|(signgu, (opened, closed))| AggregateRow { signgu: s!(signgu), opened, closed })
            .collect()
    }

    /// Filtered rows projected to [`RAW_VIEW_HEADERS`].
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|r| vec![
                r.area_name.clone(),
                r.signgu.clone(),
                r.stores.to_string(),
                r.opened.to_string(),
                r.closed.to_string(),
            ])
            .collect()
    }
}
