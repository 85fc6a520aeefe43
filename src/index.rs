//! Key-based indexes over filtered grids

use crate::column::column_label;
use crate::types::Row;
use indexmap::IndexMap;

/// Trimmed key -> owning row, iterated in first-insertion order
pub type KeyedIndex = IndexMap<String, Row>;

/// Index `rows` by the trimmed text of the cell at `key_col`
///
/// Rows with an empty or whitespace-only key are treated as unassigned and left
/// out. When two rows share a key the later row wins but the key keeps the
/// position of its first occurrence; both cases are logged as warnings.
pub fn build_index(rows: &[Row], key_col: usize) -> KeyedIndex {
    let mut index = KeyedIndex::with_capacity(rows.len());

    for row in rows {
        let key = row.trimmed(key_col);
        if key.is_empty() {
            log::warn!(
                "Row {} has no key in column {}; leaving it unassigned",
                row.index + 1,
                column_label(key_col)
            );
            continue;
        }

        if let Some(previous) = index.insert(key, row.clone()) {
            log::warn!(
                "Duplicate key '{}' in column {}: row {} replaces row {}",
                row.trimmed(key_col),
                column_label(key_col),
                row.index + 1,
                previous.index + 1
            );
        }
    }

    index
}

/// Merge `other` into `base`: new keys are appended, existing keys take the
/// row from `other` and keep their position
pub fn merge_index(base: &mut KeyedIndex, other: KeyedIndex) {
    for (key, row) in other {
        if base.insert(key.clone(), row).is_some() {
            log::warn!("Key '{}' present in both merged indexes; keeping the later row", key);
        }
    }
}
