// src/schema.rs
//! Column names of the upstream services and the typed records built from them.
//!
//! Tables travel through the pipeline as [`DataSet`]s so that every upstream
//! field is persisted verbatim, but the columns the pipeline depends on are
//! resolved once at each ingestion boundary. A renamed or missing column
//! fails there instead of surfacing later as empty charts.

use crate::core::sanitize::{ normalize_code, parse_count };
use crate::error::PipelineError;
use crate::store::DataSet;

/// District area code: join key, present in both services.
pub const TRDAR_CD: &str = "TRDAR_CD";
pub const TRDAR_CD_NM: &str = "TRDAR_CD_NM";
pub const SVC_INDUTY_CD: &str = "SVC_INDUTY_CD";
pub const SVC_INDUTY_CD_NM: &str = "SVC_INDUTY_CD_NM";
pub const STOR_CO: &str = "STOR_CO";
pub const OPBIZ_STOR_CO: &str = "OPBIZ_STOR_CO";
pub const CLSBIZ_STOR_CO: &str = "CLSBIZ_STOR_CO";
/// Administrative district (gu) name, from the district service.
pub const SIGNGU_CD_NM: &str = "SIGNGU_CD_NM";

fn require(ds: &DataSet, column: &'static str, origin: &str) -> Result<usize, PipelineError> {
    ds.column_index(column)
        .ok_or_else(|| PipelineError::MissingColumn { origin: s!(origin), column })
}

fn count_at(
    ds: &DataSet,
    row: usize,
    col: usize,
    column: &'static str,
    origin: &str,
) -> Result<u64, PipelineError> {
    let raw = ds.cell(row, col);
    parse_count(raw).ok_or_else(|| PipelineError::BadCount {
        origin: s!(origin),
        row: row + 1,
        column,
        value: s!(raw),
    })
}

/* ---------------- Facts ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactRecord {
    pub district_code: String,
    pub district_name: String,
    pub industry_code: String,
    pub industry_name: String,
    pub stores: u64,
    pub opened: u64,
    pub closed: u64,
}

/// Positions of the fact columns inside a table.
#[derive(Clone, Copy, Debug)]
pub struct FactColumns {
    pub district_code: usize,
    pub district_name: usize,
    pub industry_code: usize,
    pub industry_name: usize,
    pub stores: usize,
    pub opened: usize,
    pub closed: usize,
}

impl FactColumns {
    pub fn resolve(ds: &DataSet, origin: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            district_code: require(ds, TRDAR_CD, origin)?,
            district_name: require(ds, TRDAR_CD_NM, origin)?,
            industry_code: require(ds, SVC_INDUTY_CD, origin)?,
            industry_name: require(ds, SVC_INDUTY_CD_NM, origin)?,
            stores: require(ds, STOR_CO, origin)?,
            opened: require(ds, OPBIZ_STOR_CO, origin)?,
            closed: require(ds, CLSBIZ_STOR_CO, origin)?,
        })
    }

    pub fn record(&self, ds: &DataSet, row: usize, origin: &str) -> Result<FactRecord, PipelineError> {
        Ok(FactRecord {
            district_code: normalize_code(ds.cell(row, self.district_code)),
            district_name: s!(ds.cell(row, self.district_name)),
            industry_code: s!(ds.cell(row, self.industry_code)),
            industry_name: s!(ds.cell(row, self.industry_name)),
            stores: count_at(ds, row, self.stores, STOR_CO, origin)?,
            opened: count_at(ds, row, self.opened, OPBIZ_STOR_CO, origin)?,
            closed: count_at(ds, row, self.closed, CLSBIZ_STOR_CO, origin)?,
        })
    }

    /// Type-check every row of a fact table without keeping the records.
    pub fn validate(&self, ds: &DataSet, origin: &str) -> Result<(), PipelineError> {
        (0..ds.row_count()).try_for_each(|i| self.record(ds, i, origin).map(drop))
    }
}

/* ---------------- Districts ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionRecord {
    /// Normalized district area code.
    pub district_code: String,
    pub signgu_name: String,
}

/* ---------------- Joined ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinedRecord {
    pub fact: FactRecord,
    /// `None` when no district row matched the fact's code.
    pub signgu_name: Option<String>,
}

/// Positions of the joined-table columns the dashboard reads.
#[derive(Clone, Copy, Debug)]
pub struct JoinedColumns {
    pub facts: FactColumns,
    pub signgu_name: usize,
}

impl JoinedColumns {
    pub fn resolve(ds: &DataSet, origin: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            facts: FactColumns::resolve(ds, origin)?,
            signgu_name: require(ds, SIGNGU_CD_NM, origin)?,
        })
    }

    pub fn record(&self, ds: &DataSet, row: usize, origin: &str) -> Result<JoinedRecord, PipelineError> {
        let name = ds.cell(row, self.signgu_name).trim();
        Ok(JoinedRecord {
            fact: self.facts.record(ds, row, origin)?,
            signgu_name: if name.is_empty() { None } else { Some(s!(name)) },
        })
    }
}
