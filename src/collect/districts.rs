// src/collect/districts.rs
use std::collections::HashMap;

use tracing::{ debug, info };

use crate::config::consts::DISTRICT_SERVICE;
use crate::config::{ Config, RowLimit };
use crate::core::sanitize::{ json_cell, normalize_code };
use crate::error::PipelineError;
use crate::fetch::{ OpenApiClient, PageSource, Paginator, Record };
use crate::schema::{ DimensionRecord, SIGNGU_CD_NM, TRDAR_CD };

/// District code → administrative district, one row per code.
#[derive(Clone, Debug, Default)]
pub struct DistrictTable {
    rows: Vec<DimensionRecord>,
    by_code: HashMap<String, usize>,
}

impl DistrictTable {
    /// Build from upstream rows, keeping the first row seen for each code.
    /// Rows without a code or district name are dropped.
    pub fn from_records(records: &[Record]) -> Self {
        let mut table = Self::default();
        let mut skipped = 0usize;

        for rec in records {
            let code = rec.get(TRDAR_CD).map(json_cell).map(|c| normalize_code(&c)).unwrap_or_default();
            let name = rec.get(SIGNGU_CD_NM).map(json_cell).unwrap_or_default();
            let name = name.trim();
            if code.is_empty() || name.is_empty() {
                skipped += 1;
                continue;
            }
            table.insert(DimensionRecord { district_code: code, signgu_name: s!(name) });
        }

        if skipped > 0 {
            debug!("Skipped {skipped} district rows without {TRDAR_CD} or {SIGNGU_CD_NM}");
        }
        table
    }

    /// First insert for a code wins; later ones are ignored. Returns whether it was kept.
    pub fn insert(&mut self, rec: DimensionRecord) -> bool {
        if self.by_code.contains_key(&rec.district_code) {
            return false;
        }
        self.by_code.insert(rec.district_code.clone(), self.rows.len());
        self.rows.push(rec);
        true
    }

    /// Look up by an already-normalized code.
    pub fn signgu_for(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(|&i| self.rows[i].signgu_name.as_str())
    }

    pub fn rows(&self) -> &[DimensionRecord] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Collects district metadata (`TbgisTrdarRelm`). Always unbounded.
pub struct DistrictCollector {
    config: Config,
}

impl DistrictCollector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn collect(&self) -> Result<DistrictTable, PipelineError> {
        let key = self.config.credential()?;
        let source = OpenApiClient::new(&self.config.api, key, DISTRICT_SERVICE);
        self.collect_from(source)
    }

    pub fn collect_from<S: PageSource>(&self, source: S) -> Result<DistrictTable, PipelineError> {
        info!("Collecting district metadata");
        let fetched = Paginator::new(source, self.config.api.page_size, RowLimit::Unbounded).collect_all();

        let table = DistrictTable::from_records(&fetched.records);
        if table.is_empty() {
            return Err(PipelineError::DataAbsent(format!(
                "no district metadata retrieved ({} raw rows); check the API key and server status",
                fetched.records.len()
            )));
        }

        info!("District metadata: {} districts from {} rows", table.len(), fetched.records.len());
        Ok(table)
    }
}
