// src/fetch.rs
//! Page-indexed fetch loop for the Seoul open-data API.
//!
//! The API serves rows by 1-based inclusive index ranges
//! (`.../{SERVICE}/{START}/{END}/`) and does not say up front how many rows
//! exist. [`Paginator`] walks the ranges one page at a time and yields rows
//! lazily, stopping when:
//! - a row limit is set and already met (checked *before* each request, so a
//!   run can overshoot the limit by up to one page),
//! - a page comes back empty (source exhausted),
//! - a page comes back short (that was the last page),
//! - a request fails. Rows already received are kept; there is no retry.
//!
//! Why the loop stopped is available from [`Paginator::stop_reason`].

use std::collections::VecDeque;

use serde::Deserialize;
use serde_json::{ Map, Value };
use tracing::{ debug, error, info, warn };

use crate::config::consts::PROGRESS_MILESTONE;
use crate::config::{ ApiOptions, Credential, RowLimit };
use crate::core::net::HttpClient;
use crate::error::PipelineError;
use crate::progress::Progress;

/// One upstream row, keys in upstream order.
pub type Record = Map<String, Value>;

/// Anything that can serve a page of rows by inclusive 1-based range.
pub trait PageSource {
    /// Fetch rows `start..=end`. An empty vector means there is nothing more.
    fn fetch_page(&mut self, start: usize, end: usize) -> Result<Vec<Record>, PipelineError>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self, start: usize, end: usize) -> Result<Vec<Record>, PipelineError> {
        (**self).fetch_page(start, end)
    }
}

/* ---------------- HTTP source ---------------- */

pub struct OpenApiClient {
    http: HttpClient,
    base_url: String,
    format: String,
    service: String,
    key: Credential,
}

impl OpenApiClient {
    pub fn new(api: &ApiOptions, key: Credential, service: &str) -> Self {
        Self {
            http: HttpClient::new(api.timeout),
            base_url: s!(api.base_url.trim_end_matches('/')),
            format: api.format.clone(),
            service: s!(service),
            key,
        }
    }

    fn url(&self, start: usize, end: usize) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}/",
            self.base_url, self.key.expose(), self.format, self.service, start, end
        )
    }
}

impl PageSource for OpenApiClient {
    fn fetch_page(&mut self, start: usize, end: usize) -> Result<Vec<Record>, PipelineError> {
        debug!("GET {} rows {}..={}", self.service, start, end);
        let body = self.http.get_text(&self.url(start, end)).map_err(|e| PipelineError::Transport {
            start,
            end,
            reason: e.to_string(),
        })?;
        extract_rows(&self.service, &body)
            .map_err(|reason| PipelineError::Transport { start, end, reason })
    }
}

/// Status block the API attaches to every answer.
#[derive(Debug, Default, Deserialize)]
struct ApiStatus {
    #[serde(rename = "CODE", default)]
    code: String,
    #[serde(rename = "MESSAGE", default)]
    message: String,
}

/// Pull the `row` list out of `{SERVICE: {"list_total_count": n, "row": [...]}}`.
///
/// A missing service key or `row` list means "no more data". The API reports
/// its own failures (bad key, out-of-range start) as a top-level `RESULT`
/// object with HTTP 200; those are logged and also read as "no more data".
pub fn extract_rows(service: &str, body: &str) -> Result<Vec<Record>, String> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| format!("malformed JSON payload: {e}"))?;

    let Some(envelope) = json.get(service) else {
        if let Some(result) = json.get("RESULT") {
            let status = ApiStatus::deserialize(result).unwrap_or_default();
            info!("{service}: API answered {} {}", status.code, status.message);
        }
        return Ok(Vec::new());
    };

    let Some(rows) = envelope.get("row") else {
        return Ok(Vec::new());
    };
    let rows = rows.as_array().ok_or_else(|| s!("'row' is not a list"))?;

    rows.iter()
        .map(|r| r.as_object().cloned().ok_or_else(|| s!("'row' entry is not an object")))
        .collect()
}

/* ---------------- Fetch loop ---------------- */

#[derive(Debug)]
pub enum StopReason {
    /// A page came back with no rows.
    Exhausted,
    /// A page came back shorter than the page size.
    LastPage,
    /// The row limit was met before the next request.
    LimitReached,
    /// A request failed; rows fetched before it are kept.
    Aborted(PipelineError),
}

impl StopReason {
    pub fn is_aborted(&self) -> bool { matches!(self, StopReason::Aborted(_)) }
}

pub struct Paginator<'p, S: PageSource> {
    source: S,
    page_size: usize,
    limit: RowLimit,
    cursor: usize,
    fetched: usize,
    buffer: VecDeque<Record>,
    stop: Option<StopReason>,
    progress: Option<&'p mut dyn Progress>,
}

impl<'p, S: PageSource> Paginator<'p, S> {
    pub fn new(source: S, page_size: usize, limit: RowLimit) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            limit,
            cursor: 1,
            fetched: 0,
            buffer: VecDeque::new(),
            stop: None,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: Option<&'p mut dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Rows received from the source so far (including ones not yet yielded).
    pub fn fetched(&self) -> usize { self.fetched }

    /// `None` while the loop can still make requests.
    pub fn stop_reason(&self) -> Option<&StopReason> { self.stop.as_ref() }

    /// Drain every remaining row.
    pub fn collect_all(mut self) -> Fetched {
        let records: Vec<Record> = self.by_ref().collect();
        let stop = self.stop.take().unwrap_or(StopReason::Exhausted);
        Fetched { records, stop }
    }

    fn halt(&mut self, reason: StopReason) {
        match &reason {
            StopReason::Exhausted => info!("No more rows available ({} fetched)", self.fetched),
            StopReason::LastPage => info!("Reached last page ({} fetched)", self.fetched),
            StopReason::LimitReached => info!("Row limit reached ({} fetched)", self.fetched),
            StopReason::Aborted(e) => error!("Fetch aborted after {} rows: {e}", self.fetched),
        }
        if let Some(p) = self.progress.as_deref_mut() {
            p.finish(self.fetched);
        }
        self.stop = Some(reason);
    }

    fn next_page(&mut self) {
        if self.limit.reached(self.fetched) {
            self.halt(StopReason::LimitReached);
            return;
        }
        if self.cursor == 1 {
            if let Some(p) = self.progress.as_deref_mut() {
                let target = match self.limit { RowLimit::AtLeast(n) => Some(n), RowLimit::Unbounded => None };
                p.begin(target);
            }
        }

        let start = self.cursor;
        let end = start + self.page_size - 1;

        let rows = match self.source.fetch_page(start, end) {
            Ok(rows) => rows,
            Err(e) => {
                self.halt(StopReason::Aborted(e));
                return;
            }
        };
        if rows.is_empty() {
            self.halt(StopReason::Exhausted);
            return;
        }

        let n = rows.len();
        let before = self.fetched;
        self.fetched += n;
        self.buffer.extend(rows);

        if self.fetched / PROGRESS_MILESTONE > before / PROGRESS_MILESTONE {
            info!("{} rows collected so far", self.fetched);
        }
        if let Some(p) = self.progress.as_deref_mut() {
            p.page_done(start, self.fetched);
        }

        self.cursor += self.page_size;

        if n < self.page_size {
            self.halt(StopReason::LastPage);
        } else if n > self.page_size {
            warn!("Page {start}..={end} returned {n} rows (page size {})", self.page_size);
        }
    }
}

impl<S: PageSource> Iterator for Paginator<'_, S> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            if let Some(r) = self.buffer.pop_front() {
                return Some(r);
            }
            if self.stop.is_some() {
                return None;
            }
            self.next_page();
        }
    }
}

/// Everything one fetch loop produced.
#[derive(Debug)]
pub struct Fetched {
    pub records: Vec<Record>,
    pub stop: StopReason,
}
