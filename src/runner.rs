// src/runner.rs
//
// Stage boundary. Each stage runs to completion or returns early; errors are
// logged here once and handed back so the frontend can pick an exit status.
// Nothing is retried and no stage triggers another on failure.

use tracing::{ error, info, warn };

use crate::{
    collect::{ FactOutcome, StoreFactCollector },
    config::Config,
    data::RawData,
    error::PipelineError,
    fetch::StopReason,
    preprocess::{ JoinReport, Preprocessor },
    progress::Progress,
};

/// Summary of what `run_all` produced.
#[derive(Debug)]
pub struct RunSummary {
    pub facts: FactOutcome,
    pub join: JoinReport,
}

fn report<T>(stage: &'static str, res: Result<T, PipelineError>) -> Result<T, PipelineError> {
    if let Err(e) = &res {
        error!(stage, "{e}");
    }
    res
}

/// Fetch store facts and write the fact artifact.
pub fn collect(config: &Config, progress: Option<&mut dyn Progress>) -> Result<FactOutcome, PipelineError> {
    let res = StoreFactCollector::new(config.clone()).collect(progress);
    if let Ok(outcome) = &res {
        if let StopReason::Aborted(e) = outcome.stop() {
            warn!(stage = "collect", "kept partial data after failure: {e}");
        }
    }
    report("collect", res)
}

/// Join the fact artifact with fresh district metadata.
pub fn preprocess(config: &Config) -> Result<JoinReport, PipelineError> {
    report("preprocess", Preprocessor::new(config.clone()).run())
}

/// Collect, then preprocess. Stops at the first stage that fails.
pub fn run_all(config: &Config, progress: Option<&mut dyn Progress>) -> Result<RunSummary, PipelineError> {
    let facts = collect(config, progress)?;
    if let FactOutcome::Empty { .. } = facts {
        info!("Nothing new collected; preprocessing any existing fact file");
    }
    let join = preprocess(config)?;
    Ok(RunSummary { facts, join })
}

/// Load the final joined table for display.
pub fn load_final(config: &Config) -> Result<RawData, PipelineError> {
    report("view", RawData::load(&config.final_path()))
}
