// src/preprocess.rs
//! Join store facts with district metadata.
//!
//! - Input: the fact artifact written by the collector (must already exist;
//!   this stage never re-collects it) and a fresh district table.
//! - Join key: `TRDAR_CD`, normalized to canonical text on both sides.
//! - Left join: every fact row comes out exactly once. Rows with no matching
//!   district keep an empty `SIGNGU_CD_NM` and are counted, not dropped.

use std::path::PathBuf;

use tracing::{ info, warn };

use crate::collect::{ DistrictCollector, DistrictTable };
use crate::config::Config;
use crate::core::sanitize::normalize_code;
use crate::error::PipelineError;
use crate::fetch::PageSource;
use crate::schema::{ FactColumns, SIGNGU_CD_NM };
use crate::store::{ self, DataSet };

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinReport {
    pub path: PathBuf,
    pub rows: usize,
    pub districts: usize,
    /// Fact rows with no matching district. Non-zero is a warning, not a failure.
    pub unmatched: usize,
}

/// Left-join `facts` onto `districts`. Returns the joined table and the unmatched count.
///
/// The fact side's code column is rewritten in normalized form so the output
/// carries the same key text that was matched on.
pub fn left_join(facts: &DataSet, districts: &DistrictTable) -> Result<(DataSet, usize), PipelineError> {
    let cols = FactColumns::resolve(facts, "fact table")?;

    let mut out = facts.clone();
    let name_ix = out.ensure_column(SIGNGU_CD_NM);

    let mut unmatched = 0usize;
    for row in &mut out.rows {
        let code = normalize_code(&row[cols.district_code]);
        match districts.signgu_for(&code) {
            Some(name) => row[name_ix] = s!(name),
            None => unmatched += 1,
        }
        row[cols.district_code] = code;
    }

    Ok((out, unmatched))
}

pub struct Preprocessor {
    config: Config,
}

impl Preprocessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Credential check, fact load, district fetch over HTTP, join, save.
    pub fn run(&self) -> Result<JoinReport, PipelineError> {
        self.config.credential()?;
        let facts = self.load_facts()?;
        let districts = DistrictCollector::new(self.config.clone()).collect()?;
        self.merge_and_save(&facts, &districts)
    }

    /// Same as [`run`](Self::run) with the district rows served by `source`.
    pub fn run_from<S: PageSource>(&self, source: S) -> Result<JoinReport, PipelineError> {
        self.config.credential()?;
        let facts = self.load_facts()?;
        let districts = DistrictCollector::new(self.config.clone()).collect_from(source)?;
        self.merge_and_save(&facts, &districts)
    }

    /// Load and type-check the fact artifact.
    pub fn load_facts(&self) -> Result<DataSet, PipelineError> {
        let path = self.config.fact_path();
        if !path.exists() {
            return Err(PipelineError::DataAbsent(format!(
                "{} not found; run the collector first",
                path.display()
            )));
        }

        info!("Loading {}", path.display());
        let ds = store::load_dataset(&path)?;
        let origin = path.display().to_string();
        FactColumns::resolve(&ds, &origin)?.validate(&ds, &origin)?;

        info!("Loaded fact table: {} rows", ds.row_count());
        Ok(ds)
    }

    pub fn merge_and_save(&self, facts: &DataSet, districts: &DistrictTable) -> Result<JoinReport, PipelineError> {
        info!("Joining {} fact rows with {} districts", facts.row_count(), districts.len());
        let (joined, unmatched) = left_join(facts, districts)?;

        if unmatched > 0 {
            warn!("{unmatched} rows have no matching district; {SIGNGU_CD_NM} left empty");
        }

        let path = store::save_dataset(&self.config.final_path(), &joined)?;
        info!("Preprocessing done: {}", path.display());

        Ok(JoinReport { path, rows: joined.row_count(), districts: districts.len(), unmatched })
    }
}
