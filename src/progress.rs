// src/progress.rs
/// Lightweight progress reporting used by long-running collection.
/// Frontends implement this to surface status to users; the pipeline
/// logs milestones itself, so every method is optional.
pub trait Progress {
    /// Called before the first request with the row target (if bounded).
    fn begin(&mut self, _target: Option<usize>) {}

    /// Called after each page is accepted, with the running total.
    fn page_done(&mut self, _start: usize, _fetched: usize) {}

    /// Called once when the fetch loop stops, successful or not.
    fn finish(&mut self, _fetched: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
