//! Fetching tabs from workbooks
//!
//! A workbook on disk is a directory and each tab is a CSV file named
//! `<tab>.csv` inside it. Cells are classified into [`CellValue`]s as they are
//! read, with naive date/times interpreted in the run's civil offset.

use crate::error::{LogisticsError, Result};
use crate::types::{CellValue, Grid, Row};
use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of tab files inside a workbook directory
pub const TAB_EXTENSION: &str = "csv";

/// Something that can hand out a tab as a grid
pub trait TabularSource {
    /// Fetch every populated row of `tab` in workbook `source_id`
    ///
    /// Any failure aborts the run; no partial grid is returned.
    fn fetch(&mut self, source_id: &str, tab: &str) -> Result<Grid>;
}

/// Workbooks stored as directories of CSV tabs under a common root
///
/// # Examples
///
/// ```no_run
/// use pantry_logistics::reader::{CsvWorkbook, TabularSource};
///
/// let mut workbooks = CsvWorkbook::new("data", 4)?;
/// let grid = workbooks.fetch("requests", "Meals - PENDING")?;
/// println!("{} rows", grid.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    root: PathBuf,
    civil: FixedOffset,
}

impl CsvWorkbook {
    /// Open the workbook root; `utc_offset_hours` is how far the civil zone is behind UTC
    pub fn new<P: AsRef<Path>>(root: P, utc_offset_hours: i32) -> Result<Self> {
        Ok(CsvWorkbook {
            root: root.as_ref().to_path_buf(),
            civil: crate::window::civil_offset(utc_offset_hours)?,
        })
    }

    /// Directory holding the tabs of `workbook`
    pub fn workbook_dir(&self, workbook: &str) -> PathBuf {
        self.root.join(workbook)
    }

    /// File path of `tab` in `workbook`
    pub fn tab_path(&self, workbook: &str, tab: &str) -> PathBuf {
        self.workbook_dir(workbook)
            .join(format!("{}.{}", tab, TAB_EXTENSION))
    }

    /// Names of the tabs present in `workbook`, sorted
    pub fn tab_names(&self, workbook: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.workbook_dir(workbook))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(TAB_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read a tab file as raw text rows
    pub(crate) fn read_raw(path: &Path) -> Result<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}

impl TabularSource for CsvWorkbook {
    fn fetch(&mut self, source_id: &str, tab: &str) -> Result<Grid> {
        let fetch_error = |reason: String| LogisticsError::SourceFetchFailure {
            source_id: source_id.to_string(),
            tab: tab.to_string(),
            reason,
        };

        let dir = self.workbook_dir(source_id);
        if !dir.is_dir() {
            return Err(fetch_error(format!(
                "workbook directory {} does not exist",
                dir.display()
            )));
        }

        let path = self.tab_path(source_id, tab);
        if !path.is_file() {
            let available = self
                .tab_names(source_id)
                .map_err(|e| fetch_error(e.to_string()))?
                .join(", ");
            return Err(LogisticsError::TabNotFound {
                workbook: source_id.to_string(),
                tab: tab.to_string(),
                available,
            });
        }

        let raw = Self::read_raw(&path).map_err(|e| fetch_error(e.to_string()))?;
        let grid = rectangular(raw, self.civil);

        log::info!(
            "Fetched {} rows from '{}' / '{}'",
            grid.len(),
            source_id,
            tab
        );
        Ok(grid)
    }
}

/// Classify raw text rows and pad them to the widest row
pub fn rectangular(raw: Vec<Vec<String>>, civil: FixedOffset) -> Grid {
    let width = raw.iter().map(Vec::len).max().unwrap_or(0);

    raw.into_iter()
        .enumerate()
        .map(|(index, fields)| {
            let mut cells: Vec<CellValue> = fields
                .iter()
                .map(|field| CellValue::classify(field, civil))
                .collect();
            cells.resize(width, CellValue::Empty);
            Row::new(index, cells)
        })
        .collect()
}
