//! Run configuration
//!
//! Defaults reproduce the production setup, so a run with
//! `LogisticsConfig::default()` needs no further input.

use crate::column::CellRef;
use crate::error::Result;
use crate::layout::{RequestLayout, SupplierLayout, VolunteerLayout};

/// Placeholder written when a lookup does not resolve
pub const DATA_NOT_FOUND: &str = "DATA_NOT_FOUND";

/// A tab inside a workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    /// Workbook identifier understood by the source/writer
    pub workbook: String,
    /// Tab name
    pub tab: String,
}

impl TabSpec {
    pub fn new(workbook: impl Into<String>, tab: impl Into<String>) -> Self {
        TabSpec {
            workbook: workbook.into(),
            tab: tab.into(),
        }
    }
}

/// Everything a run needs besides its clock and storage
#[derive(Debug, Clone)]
pub struct LogisticsConfig {
    pub meals: TabSpec,
    pub groceries: TabSpec,
    pub chef_signups: TabSpec,
    pub recurring_chefs: TabSpec,
    pub volunteers: TabSpec,
    pub target: TabSpec,
    /// First cell of the written block (A1 notation)
    pub anchor: String,
    /// Hours the civil timezone is behind UTC
    pub utc_offset_hours: i32,
    pub sentinel: String,
    /// City appended to map searches
    pub city: String,
    /// Join groceries requests in addition to meals
    pub include_groceries: bool,
    pub request_layout: RequestLayout,
    pub chef_signup_layout: SupplierLayout,
    pub recurring_chef_layout: SupplierLayout,
    pub volunteer_layout: VolunteerLayout,
}

impl Default for LogisticsConfig {
    fn default() -> Self {
        LogisticsConfig {
            meals: TabSpec::new("requests", "Meals - PENDING"),
            groceries: TabSpec::new("requests", "Groceries - PENDING"),
            chef_signups: TabSpec::new("chefs", "MEALS SIGN-UP"),
            recurring_chefs: TabSpec::new("chefs", "RECURRENT MEALS"),
            volunteers: TabSpec::new("volunteers", "New Chefs list"),
            target: TabSpec::new("logistics", "Testing automation"),
            anchor: "A2".to_string(),
            utc_offset_hours: 4,
            sentinel: DATA_NOT_FOUND.to_string(),
            city: "Toronto".to_string(),
            include_groceries: false,
            request_layout: RequestLayout::default(),
            chef_signup_layout: SupplierLayout::chef_signups(),
            recurring_chef_layout: SupplierLayout::recurring_chefs(),
            volunteer_layout: VolunteerLayout::default(),
        }
    }
}

impl LogisticsConfig {
    /// Set the target tab
    pub fn with_target(mut self, target: TabSpec) -> Self {
        self.target = target;
        self
    }

    /// Set the UTC offset (hours behind UTC)
    pub fn with_utc_offset(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Enable or disable the groceries requests tab
    pub fn with_groceries(mut self, include: bool) -> Self {
        self.include_groceries = include;
        self
    }

    /// Set the first cell of the written block
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    /// Parsed write anchor
    pub fn anchor_ref(&self) -> Result<CellRef> {
        CellRef::parse(&self.anchor)
    }
}
