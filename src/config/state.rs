// src/config/state.rs
use std::collections::BTreeSet;
use std::path::{ Path, PathBuf };

use super::consts::{ DEFAULT_DATA_DIR, FINAL_FILE };

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Industry currently shown; empty until data is loaded
    pub selected_industry: String,

    /// Administrative districts ticked in the side panel (empty = all)
    pub selected_districts: BTreeSet<String>,

    pub window_w: u32,
    pub window_h: u32,

    /// Raw-row table is collapsed by default
    pub show_raw_rows: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selected_industry: s!(),
            selected_districts: BTreeSet::new(),
            window_w: 1100,
            window_h: 700,
            show_raw_rows: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// Final joined artifact the dashboard reads
    pub source: PathBuf,
    pub gui: GuiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_DATA_DIR).join(FINAL_FILE),
            gui: GuiState::default(),
        }
    }
}

impl AppState {
    /// Point the dashboard at the final artifact inside `dir`.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source = dir.as_ref().join(FINAL_FILE);
        self
    }
}
