// src/store.rs
//
// Tabular artifacts on disk: one header row, comma-delimited, UTF-8 with BOM.
// The pipeline owns every file here; readers never write back.

use std::{ fs, io::{ BufWriter, Write }, path::{ Path, PathBuf } };

use crate::config::consts::STORE_SEP;
use crate::csv::{ self, UTF8_BOM };
use crate::error::PipelineError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    #[inline] pub fn row_count(&self) -> usize { self.rows.len() }
    #[inline] pub fn header_count(&self) -> usize { self.headers.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell by row and column; short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Append a column, padding every row. Returns its index.
    /// An existing column of the same name is reused and its cells cleared.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        let ix = match self.column_index(name) {
            Some(ix) => ix,
            None => {
                self.headers.push(s!(name));
                self.headers.len() - 1
            }
        };
        let width = self.headers.len();
        for row in &mut self.rows {
            if row.len() < width { row.resize(width, s!()); }
            row[ix].clear();
        }
        ix
    }
}

pub fn load_dataset(path: &Path) -> Result<DataSet, PipelineError> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let mut rows = csv::parse_rows(&text, STORE_SEP).into_iter();
    let headers = rows.next().unwrap_or_default();
    Ok(DataSet { headers, rows: rows.collect() })
}

pub fn save_dataset(path: &Path, ds: &DataSet) -> Result<PathBuf, PipelineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let write = || -> std::io::Result<()> {
        let mut out = BufWriter::new(fs::File::create(path)?); // truncate/overwrite
        out.write_all(UTF8_BOM.as_bytes())?;
        csv::write_row(&mut out, &ds.headers, STORE_SEP)?;
        for row in &ds.rows {
            csv::write_row(&mut out, row, STORE_SEP)?;
        }
        out.flush()
    };
    write().map_err(|e| PipelineError::io(path, e))?;

    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<(), PipelineError> {
    if dir.exists() && !dir.is_dir() {
        return Err(PipelineError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_column_appends_and_pads() {
        let mut ds = DataSet {
            headers: vec![s!("A")],
            rows: vec![vec![s!("1")], vec![s!("2")]],
        };
        let ix = ds.ensure_column("B");
        assert_eq!(ix, 1);
        assert!(ds.rows.iter().all(|r| r.len() == 2 && r[1].is_empty()));
    }

    #[test]
    fn ensure_column_clears_existing() {
        let mut ds = DataSet {
            headers: vec![s!("A"), s!("B")],
            rows: vec![vec![s!("1"), s!("stale")]],
        };
        assert_eq!(ds.ensure_column("B"), 1);
        assert_eq!(ds.cell(0, 1), "");
    }
}
