//! Spreadsheet-style column and cell addressing
//!
//! Columns are labelled in bijective base 26 ("A" = 1 ... "Z" = 26, "AA" = 27)
//! and exposed to the rest of the crate as zero-based indexes.

use crate::error::{LogisticsError, Result};
use std::fmt;

/// Convert a column label to its zero-based index ("A" -> 0, "Z" -> 25, "AA" -> 26)
///
/// Labels are case-insensitive. Anything other than a non-empty run of ASCII
/// letters fails with [`LogisticsError::InvalidColumnLabel`].
///
/// # Examples
///
/// ```
/// use pantry_logistics::column::column_index;
///
/// assert_eq!(column_index("AO").unwrap(), 40);
/// assert!(column_index("A1").is_err());
/// ```
pub fn column_index(label: &str) -> Result<usize> {
    if label.is_empty() {
        return Err(LogisticsError::InvalidColumnLabel(label.to_string()));
    }

    let mut index: usize = 0;
    for byte in label.bytes() {
        if !byte.is_ascii_alphabetic() {
            return Err(LogisticsError::InvalidColumnLabel(label.to_string()));
        }
        let digit = (byte.to_ascii_uppercase() - b'A' + 1) as usize;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| LogisticsError::InvalidColumnLabel(label.to_string()))?;
    }

    Ok(index - 1)
}

/// Convert a zero-based column index to its label (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_label(index: usize) -> String {
    let mut result = String::new();
    let mut col = index + 1;

    while col > 0 {
        col -= 1;
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        col /= 26;
    }

    result
}

/// Zero-based cell position parsed from an A1-style reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl CellRef {
    /// Create a new cell reference
    pub fn new(row: usize, col: usize) -> Self {
        CellRef { row, col }
    }

    /// Parse an A1-style reference such as "A2" or "ao17"
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = || LogisticsError::InvalidCellReference(reference.to_string());

        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = reference.split_at(split);

        let col = column_index(letters).map_err(|_| invalid())?;
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(CellRef { row: row - 1, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.col), self.row + 1)
    }
}

/// Render the A1-style range covered by `rows` x `cols` cells starting at `anchor`
///
/// An empty block renders as the anchor alone.
pub fn range_label(anchor: CellRef, rows: usize, cols: usize) -> String {
    if rows == 0 || cols == 0 {
        return anchor.to_string();
    }
    let end = CellRef::new(anchor.row + rows - 1, anchor.col + cols - 1);
    format!("{}:{}", anchor, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AO").unwrap(), 40);
        assert_eq!(column_index("ao").unwrap(), 40);
        assert_eq!(column_index("AZ").unwrap(), 51);
        assert_eq!(column_index("ZZ").unwrap(), 701);
        assert_eq!(column_index("AAA").unwrap(), 702);
    }

    #[test]
    fn test_column_index_rejects_malformed_labels() {
        for label in ["", "1", "A1", " A", "-", "É"] {
            assert!(
                matches!(
                    column_index(label),
                    Err(LogisticsError::InvalidColumnLabel(_))
                ),
                "label {:?} should be rejected",
                label
            );
        }
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(40), "AO");

        for index in [0, 12, 25, 26, 40, 701, 702] {
            assert_eq!(column_index(&column_label(index)).unwrap(), index);
        }
    }

    #[test]
    fn test_cell_ref_parse() {
        assert_eq!(CellRef::parse("A2").unwrap(), CellRef::new(1, 0));
        assert_eq!(CellRef::parse("ao17").unwrap(), CellRef::new(16, 40));
        assert_eq!(CellRef::parse("M1").unwrap().to_string(), "M1");

        for reference in ["", "A", "2", "A0", "A-1", "1A"] {
            assert!(CellRef::parse(reference).is_err(), "{:?}", reference);
        }
    }

    #[test]
    fn test_range_label() {
        let anchor = CellRef::new(1, 0);
        assert_eq!(range_label(anchor, 5, 13), "A2:M6");
        assert_eq!(range_label(anchor, 1, 1), "A2:A2");
        assert_eq!(range_label(anchor, 0, 13), "A2");
    }
}
