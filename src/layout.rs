//! Named-field layouts of the source tabs
//!
//! Each layout maps the fields a run reads to spreadsheet column labels. Labels
//! are resolved to indexes once, before anything is fetched, so the join works
//! on named fields and a bad label aborts the run up front.

use crate::column::column_index;
use crate::error::Result;

/// Columns of a meals or groceries request tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLayout {
    pub date: String,
    pub id: String,
    pub intersection: String,
    pub zone: String,
    pub notes: String,
}

impl Default for RequestLayout {
    fn default() -> Self {
        RequestLayout {
            date: "D".to_string(),
            id: "B".to_string(),
            intersection: "S".to_string(),
            zone: "Q".to_string(),
            notes: "AO".to_string(),
        }
    }
}

/// Resolved [`RequestLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestColumns {
    pub date: usize,
    pub id: usize,
    pub intersection: usize,
    pub zone: usize,
    pub notes: usize,
}

impl RequestLayout {
    pub fn resolve(&self) -> Result<RequestColumns> {
        Ok(RequestColumns {
            date: column_index(&self.date)?,
            id: column_index(&self.id)?,
            intersection: column_index(&self.intersection)?,
            zone: column_index(&self.zone)?,
            notes: column_index(&self.notes)?,
        })
    }
}

/// Columns of a supplier tab (chef signups or recurring chefs)
///
/// The two supplier tabs keep contact and pickup time in different columns,
/// so each has its own layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierLayout {
    pub date: String,
    pub request_id: String,
    pub contact: String,
    pub pickup_time: String,
}

impl SupplierLayout {
    /// Default layout of the one-off chef signup tab
    pub fn chef_signups() -> Self {
        SupplierLayout {
            date: "O".to_string(),
            request_id: "B".to_string(),
            contact: "K".to_string(),
            pickup_time: "P".to_string(),
        }
    }

    /// Default layout of the recurring chef tab
    pub fn recurring_chefs() -> Self {
        SupplierLayout {
            date: "N".to_string(),
            request_id: "B".to_string(),
            contact: "J".to_string(),
            pickup_time: "O".to_string(),
        }
    }

    pub fn resolve(&self) -> Result<SupplierColumns> {
        Ok(SupplierColumns {
            date: column_index(&self.date)?,
            request_id: column_index(&self.request_id)?,
            contact: column_index(&self.contact)?,
            pickup_time: column_index(&self.pickup_time)?,
        })
    }
}

/// Resolved [`SupplierLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplierColumns {
    pub date: usize,
    pub request_id: usize,
    pub contact: usize,
    pub pickup_time: usize,
}

/// Columns of the volunteer contact tab (not date-filtered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerLayout {
    pub contact: String,
    pub intersection: String,
}

impl Default for VolunteerLayout {
    fn default() -> Self {
        VolunteerLayout {
            contact: "C".to_string(),
            intersection: "G".to_string(),
        }
    }
}

/// Resolved [`VolunteerLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolunteerColumns {
    pub contact: usize,
    pub intersection: usize,
}

impl VolunteerLayout {
    pub fn resolve(&self) -> Result<VolunteerColumns> {
        Ok(VolunteerColumns {
            contact: column_index(&self.contact)?,
            intersection: column_index(&self.intersection)?,
        })
    }
}
