//! In-memory workbooks

use crate::column::CellRef;
use crate::error::{LogisticsError, Result};
use crate::reader::{rectangular, TabularSource};
use crate::types::{CellValue, Grid, Row};
use crate::writer::{overlay_rows, report_stale, SheetWriter};
use chrono::FixedOffset;
use std::collections::BTreeMap;

/// Workbooks held in memory, implementing both [`TabularSource`] and
/// [`SheetWriter`] with the same semantics as the CSV backend
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    tabs: BTreeMap<(String, String), Grid>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `grid` as `tab` of `workbook`, replacing any previous contents
    pub fn insert_tab(&mut self, workbook: &str, tab: &str, grid: Grid) {
        self.tabs
            .insert((workbook.to_string(), tab.to_string()), grid);
    }

    /// Store raw text rows, classifying cells as the CSV backend does
    pub fn insert_text_tab<S: AsRef<str>>(
        &mut self,
        workbook: &str,
        tab: &str,
        rows: &[Vec<S>],
        civil: FixedOffset,
    ) {
        let raw = rows
            .iter()
            .map(|row| row.iter().map(|s| s.as_ref().to_string()).collect())
            .collect();
        self.insert_tab(workbook, tab, rectangular(raw, civil));
    }

    /// Current contents of a tab
    pub fn tab(&self, workbook: &str, tab: &str) -> Option<&Grid> {
        self.tabs.get(&(workbook.to_string(), tab.to_string()))
    }

    fn tab_names(&self, workbook: &str) -> Vec<String> {
        self.tabs
            .keys()
            .filter(|(w, _)| w == workbook)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl TabularSource for MemoryWorkbook {
    fn fetch(&mut self, source_id: &str, tab: &str) -> Result<Grid> {
        if let Some(grid) = self.tab(source_id, tab) {
            return Ok(grid.clone());
        }

        let available = self.tab_names(source_id);
        if available.is_empty() {
            return Err(LogisticsError::SourceFetchFailure {
                source_id: source_id.to_string(),
                tab: tab.to_string(),
                reason: "workbook does not exist".to_string(),
            });
        }
        Err(LogisticsError::TabNotFound {
            workbook: source_id.to_string(),
            tab: tab.to_string(),
            available: available.join(", "),
        })
    }
}

impl SheetWriter for MemoryWorkbook {
    fn write(
        &mut self,
        workbook: &str,
        tab: &str,
        anchor: CellRef,
        rows: &[Vec<CellValue>],
    ) -> Result<()> {
        let key = (workbook.to_string(), tab.to_string());
        let mut grid: Vec<Vec<CellValue>> = self
            .tabs
            .remove(&key)
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.cells)
            .collect();

        let stale = overlay_rows(&mut grid, anchor, rows);
        let grid = grid
            .into_iter()
            .enumerate()
            .map(|(index, cells)| Row::new(index, cells))
            .collect();
        self.tabs.insert(key, grid);

        report_stale(tab, anchor, rows, stale);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edt() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    #[test]
    fn test_fetch_round_trip() {
        let mut memory = MemoryWorkbook::new();
        memory.insert_text_tab("chefs", "MEALS SIGN-UP", &[vec!["a", "1"], vec!["b"]], edt());

        let grid = memory.fetch("chefs", "MEALS SIGN-UP").unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].cell(1), CellValue::Int(1));
        assert_eq!(grid[1].len(), 2);
    }

    #[test]
    fn test_fetch_errors() {
        let mut memory = MemoryWorkbook::new();
        memory.insert_text_tab("chefs", "A", &[vec!["x"]], edt());

        assert!(matches!(
            memory.fetch("chefs", "B"),
            Err(LogisticsError::TabNotFound { .. })
        ));
        assert!(matches!(
            memory.fetch("nope", "A"),
            Err(LogisticsError::SourceFetchFailure { .. })
        ));
    }

    #[test]
    fn test_write_leaves_stale_rows() {
        let mut memory = MemoryWorkbook::new();
        let rows = |n: usize| -> Vec<Vec<CellValue>> {
            (0..n).map(|i| vec![CellValue::Int(i as i64)]).collect()
        };

        memory.write("out", "T", CellRef::new(1, 0), &rows(3)).unwrap();
        memory.write("out", "T", CellRef::new(1, 0), &rows(1)).unwrap();

        let grid = memory.tab("out", "T").unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[1].cell(0), CellValue::Int(0));
        assert_eq!(grid[2].cell(0), CellValue::Int(1));
        assert_eq!(grid[3].cell(0), CellValue::Int(2));
    }
}
