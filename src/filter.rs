//! Date filtering of fetched grids

use crate::types::Row;
use crate::window::DateWindow;

/// Keep the rows whose cell at `date_col` falls inside `window`
///
/// Rows whose date cell is missing or does not hold a date/time (header rows,
/// free text, blank cells) are skipped rather than reported as errors. The
/// input grid is left untouched.
pub fn filter_by_date(rows: &[Row], date_col: usize, window: &DateWindow) -> Vec<Row> {
    rows.iter()
        .filter(|row| match row.get(date_col).and_then(|c| c.as_datetime()) {
            Some(instant) => window.contains(instant),
            None => {
                log::debug!(
                    "Skipping row {}: no date in column {}",
                    row.index + 1,
                    crate::column::column_label(date_col)
                );
                false
            }
        })
        .cloned()
        .collect()
}
