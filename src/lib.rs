//! # pantry_logistics
//!
//! Builds the next-day pickup and delivery sheet for a meal program by joining
//! three independently maintained spreadsheets: delivery requests, chef signups
//! (one-off and recurring) and volunteer contacts.
//!
//! ## Pipeline
//!
//! - **Window**: one 24-hour window for tomorrow in a fixed civil offset
//! - **Fetch**: each source tab is read as a grid of classified cells
//! - **Filter**: rows whose date column falls outside the window are dropped
//! - **Index**: rows are keyed by a trimmed identifier column
//! - **Join**: every request picks up its chef (signups before recurring) and,
//!   through the chef's name, the volunteer's pickup intersection
//! - **Write**: 13-column rows are written into the target tab from `A2`
//!
//! Unresolved lookups degrade to the `DATA_NOT_FOUND` sentinel; configuration
//! and storage errors abort the run before anything is written.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pantry_logistics::{run, CsvWorkbook, LogisticsConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogisticsConfig::default();
//! let mut source = CsvWorkbook::new("data", config.utc_offset_hours)?;
//! let mut target = source.clone();
//!
//! let summary = run(&config, &mut source, &mut target, chrono::Utc::now())?;
//! println!("Wrote {} rows to {}", summary.rows_written(), summary.range);
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod index;
pub mod join;
pub mod layout;
pub mod memory;
pub mod pipeline;
pub mod reader;
pub mod types;
pub mod window;
pub mod writer;

pub use column::{column_index, CellRef};
pub use config::{LogisticsConfig, TabSpec, DATA_NOT_FOUND};
pub use error::{LogisticsError, Result};
pub use join::{LogisticsJoiner, LogisticsRow};
pub use memory::MemoryWorkbook;
pub use pipeline::{run, RunSummary};
pub use reader::{CsvWorkbook, TabularSource};
pub use types::{CellValue, Grid, Row};
pub use window::DateWindow;
pub use writer::SheetWriter;
