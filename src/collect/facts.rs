// src/collect/facts.rs
use std::path::PathBuf;

use tracing::{ info, warn };

use crate::config::consts::FACT_SERVICE;
use crate::config::{ Config, RowLimit };
use crate::error::PipelineError;
use crate::fetch::{ OpenApiClient, PageSource, Paginator, StopReason };
use crate::progress::Progress;
use crate::schema::FactColumns;
use crate::store;

use super::records_to_dataset;

/// What a fact collection run left behind.
#[derive(Debug)]
pub enum FactOutcome {
    /// Rows were written to `path`.
    Written { path: PathBuf, rows: usize, stop: StopReason },
    /// Nothing came back; no file was written (an older artifact is left untouched).
    Empty { stop: StopReason },
}

impl FactOutcome {
    pub fn stop(&self) -> &StopReason {
        match self {
            FactOutcome::Written { stop, .. } | FactOutcome::Empty { stop } => stop,
        }
    }
}

/// Collects store-count facts (`VwsmTrdarStorQq`) into the fact artifact.
pub struct StoreFactCollector {
    config: Config,
}

impl StoreFactCollector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Validate the credential, then fetch over HTTP.
    /// A missing key fails here, before any request.
    pub fn collect(&self, progress: Option<&mut dyn Progress>) -> Result<FactOutcome, PipelineError> {
        let key = self.config.credential()?;
        let source = OpenApiClient::new(&self.config.api, key, FACT_SERVICE);
        self.collect_from(source, progress)
    }

    pub fn collect_from<S: PageSource>(
        &self,
        source: S,
        progress: Option<&mut dyn Progress>,
    ) -> Result<FactOutcome, PipelineError> {
        let limit: RowLimit = self.config.fact_limit;
        info!("Collecting store data (target: {})", limit.describe());

        let fetched = Paginator::new(source, self.config.api.page_size, limit)
            .with_progress(progress)
            .collect_all();

        if fetched.records.is_empty() {
            warn!("No rows collected; fact file not written");
            return Ok(FactOutcome::Empty { stop: fetched.stop });
        }

        let ds = records_to_dataset(&fetched.records);
        let cols = FactColumns::resolve(&ds, FACT_SERVICE)?;
        cols.validate(&ds, FACT_SERVICE)?;

        let path = store::save_dataset(&self.config.fact_path(), &ds)?;
        info!("Saved {} ({} rows)", path.display(), ds.row_count());

        Ok(FactOutcome::Written { path, rows: ds.row_count(), stop: fetched.stop })
    }
}
