//! Error types for the logistics join

use thiserror::Error;

/// Result type alias for logistics operations
pub type Result<T> = std::result::Result<T, LogisticsError>;

/// Main error type for a logistics run
///
/// Anything surfaced here aborts the whole run. Lookups that merely fail to
/// resolve (no supplier, no volunteer, unparsable date) never produce an error.
#[derive(Error, Debug)]
pub enum LogisticsError {
    /// Column label is not a run of letters A-Z
    #[error("Invalid column label '{0}'")]
    InvalidColumnLabel(String),

    /// Cell reference is not a column label followed by a 1-based row number
    #[error("Invalid cell reference '{0}'")]
    InvalidCellReference(String),

    /// UTC offset does not describe a valid fixed offset
    #[error("Invalid UTC offset: {0} hours")]
    InvalidUtcOffset(i32),

    /// A configured workbook could not be read
    #[error("Failed to fetch tab '{tab}' from '{source_id}': {reason}")]
    SourceFetchFailure {
        source_id: String,
        tab: String,
        reason: String,
    },

    /// Workbook exists but has no tab with this name
    #[error("Tab '{tab}' not found in '{workbook}'. Available tabs: {available}")]
    TabNotFound {
        workbook: String,
        tab: String,
        available: String,
    },

    /// Target tab could not be written
    #[error("Failed to write tab '{tab}': {reason}")]
    WriteError { tab: String, reason: String },

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error wrapper
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
