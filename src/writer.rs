//! Writing the logistics block back into a target tab
//!
//! A write overwrites exactly the rectangle covered by the new rows. Cells
//! outside it are kept, which includes rows left below the block by an earlier,
//! longer run; those are reported but not cleared.

use crate::column::{range_label, CellRef};
use crate::error::{LogisticsError, Result};
use crate::reader::CsvWorkbook;
use crate::types::CellValue;
use std::fs;

/// Something that can persist a block of rows into a tab
pub trait SheetWriter {
    /// Overwrite `rows.len()` rows of `tab` starting at `anchor`
    fn write(
        &mut self,
        workbook: &str,
        tab: &str,
        anchor: CellRef,
        rows: &[Vec<CellValue>],
    ) -> Result<()>;
}

/// Place `rows` into `grid` at `anchor`, growing the grid as needed
///
/// Returns how many non-empty rows remain below the written block.
pub fn overlay_rows(grid: &mut Vec<Vec<CellValue>>, anchor: CellRef, rows: &[Vec<CellValue>]) -> usize {
    let end_row = anchor.row + rows.len();
    if grid.len() < end_row {
        grid.resize(end_row, Vec::new());
    }

    for (offset, row) in rows.iter().enumerate() {
        let target = &mut grid[anchor.row + offset];
        let end_col = anchor.col + row.len();
        if target.len() < end_col {
            target.resize(end_col, CellValue::Empty);
        }
        target[anchor.col..end_col].clone_from_slice(row);
    }

    grid[end_row..]
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .count()
}

pub(crate) fn report_stale(tab: &str, anchor: CellRef, rows: &[Vec<CellValue>], stale: usize) {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    log::info!(
        "Wrote {} rows to '{}' ({})",
        rows.len(),
        tab,
        range_label(anchor, rows.len(), width)
    );
    if stale > 0 {
        log::warn!(
            "{} stale rows from an earlier run remain below row {} of '{}'",
            stale,
            anchor.row + rows.len(),
            tab
        );
    }
}

impl SheetWriter for CsvWorkbook {
    fn write(
        &mut self,
        workbook: &str,
        tab: &str,
        anchor: CellRef,
        rows: &[Vec<CellValue>],
    ) -> Result<()> {
        let write_error = |reason: String| LogisticsError::WriteError {
            tab: tab.to_string(),
            reason,
        };

        fs::create_dir_all(self.workbook_dir(workbook))?;
        let path = self.tab_path(workbook, tab);

        let mut grid: Vec<Vec<CellValue>> = if path.is_file() {
            CsvWorkbook::read_raw(&path)
                .map_err(|e| write_error(e.to_string()))?
                .into_iter()
                .map(|fields| fields.into_iter().map(CellValue::String).collect())
                .collect()
        } else {
            Vec::new()
        };

        let stale = overlay_rows(&mut grid, anchor, rows);

        // Write next to the target and swap it in so a failure leaves the old tab intact
        let tmp = path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(&tmp)
                .map_err(|e| write_error(e.to_string()))?;
            for row in &grid {
                writer
                    .write_record(row.iter().map(CellValue::as_string))
                    .map_err(|e| write_error(e.to_string()))?;
            }
            writer.flush().map_err(|e| write_error(e.to_string()))?;
        }
        fs::rename(&tmp, &path).map_err(|e| write_error(e.to_string()))?;

        report_stale(tab, anchor, rows, stale);
        Ok(())
    }
}
