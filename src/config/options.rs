// src/config/options.rs
use std::fmt;
use std::path::{ Path, PathBuf };
use std::time::Duration;

use super::consts::*;
use crate::error::PipelineError;

/// Opaque API credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Reject empty and known placeholder values before any request is made.
    pub fn new(raw: &str) -> Result<Self, PipelineError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(PipelineError::Configuration(s!("no API key configured")));
        }
        if PLACEHOLDER_KEYS.contains(&key) {
            return Err(PipelineError::Configuration(s!("API key is still the placeholder value")));
        }
        Ok(Self(s!(key)))
    }

    pub fn expose(&self) -> &str { &self.0 }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Row cap for a collection run. `Unbounded` fetches until the source is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowLimit {
    Unbounded,
    AtLeast(usize),
}

impl RowLimit {
    /// `None` and `Some(0)` both mean "no limit".
    pub fn from_option(limit: Option<usize>) -> Self {
        match limit {
            None | Some(0) => RowLimit::Unbounded,
            Some(n) => RowLimit::AtLeast(n),
        }
    }

    pub fn reached(&self, count: usize) -> bool {
        match self {
            RowLimit::Unbounded => false,
            RowLimit::AtLeast(n) => count >= *n,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RowLimit::Unbounded => s!("All (Unlimited)"),
            RowLimit::AtLeast(n) => format!("{n} rows"),
        }
    }
}

impl Default for RowLimit {
    fn default() -> Self { RowLimit::AtLeast(DEFAULT_FACT_LIMIT) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiOptions {
    pub base_url: String,
    pub format: String,
    pub page_size: usize,
    /// Per-request timeout; `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: std::env::var(API_BASE_ENV).unwrap_or_else(|_| s!(API_BASE)),
            format: s!(RESPONSE_FORMAT),
            page_size: PAGE_SIZE,
            timeout: None,
        }
    }
}

/// Everything a pipeline stage needs, passed in explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub api: ApiOptions,
    /// Raw credential as configured; validated by [`Config::credential`].
    pub api_key: Option<String>,
    pub data_dir: PathBuf,
    pub fact_limit: RowLimit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiOptions::default(),
            api_key: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fact_limit: RowLimit::default(),
        }
    }
}

impl Config {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn credential(&self) -> Result<Credential, PipelineError> {
        Credential::new(self.api_key.as_deref().unwrap_or(""))
    }

    pub fn fact_path(&self) -> PathBuf { self.data_dir.join(FACT_FILE) }

    pub fn final_path(&self) -> PathBuf { self.data_dir.join(FINAL_FILE) }
}
