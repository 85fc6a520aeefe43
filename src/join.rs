//! Joining requests with their supplier and volunteer records

use crate::format::{map_link, truncate_name};
use crate::index::KeyedIndex;
use crate::layout::{RequestColumns, SupplierColumns, VolunteerColumns};
use crate::types::{CellValue, Row};
use crate::window::DateWindow;
use chrono::{DateTime, FixedOffset};

/// Number of columns in an output row
pub const LOGISTICS_WIDTH: usize = 13;

/// Which supplier tab a request was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SupplierSource {
    ChefSignup,
    RecurringChef,
}

/// One denormalized pickup/delivery line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogisticsRow {
    pub request_id: String,
    pub date: DateTime<FixedOffset>,
    /// "First L" form of the supplier contact
    pub pickup_contact: String,
    pub pickup_intersection: String,
    pub pickup_map: CellValue,
    pub pickup_time: CellValue,
    pub delivery_intersection: String,
    pub delivery_zone: CellValue,
    pub delivery_map: CellValue,
    pub delivery_notes: CellValue,
    /// `None` when neither supplier tab lists the request
    pub supplier: Option<SupplierSource>,
}

impl LogisticsRow {
    /// Cells in sheet order; columns 7-9 are left blank for manual entry
    pub fn to_cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::String(self.request_id.clone()),
            CellValue::DateTime(self.date),
            CellValue::String(self.pickup_contact.clone()),
            CellValue::String(self.pickup_intersection.clone()),
            self.pickup_map.clone(),
            self.pickup_time.clone(),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::String(self.delivery_intersection.clone()),
            self.delivery_zone.clone(),
            self.delivery_map.clone(),
            self.delivery_notes.clone(),
        ]
    }
}

/// Column positions for every table taking part in the join
#[derive(Debug, Clone, Copy)]
pub struct JoinColumns {
    pub requests: RequestColumns,
    pub chef_signups: SupplierColumns,
    pub recurring_chefs: SupplierColumns,
    pub volunteers: VolunteerColumns,
}

/// Output of [`LogisticsJoiner::join`]
#[derive(Debug, Clone, Default)]
pub struct JoinOutput {
    pub rows: Vec<LogisticsRow>,
    /// Requests with no supplier in either tab
    pub unresolved_suppliers: usize,
    /// Requests whose supplier contact has no volunteer record
    pub unresolved_volunteers: usize,
}

/// Builds logistics rows for one window
pub struct LogisticsJoiner<'a> {
    columns: JoinColumns,
    window: &'a DateWindow,
    sentinel: &'a str,
    city: &'a str,
}

struct Pickup {
    contact: String,
    intersection: String,
    time: CellValue,
    source: Option<SupplierSource>,
}

impl<'a> LogisticsJoiner<'a> {
    pub fn new(
        columns: JoinColumns,
        window: &'a DateWindow,
        sentinel: &'a str,
        city: &'a str,
    ) -> Self {
        LogisticsJoiner {
            columns,
            window,
            sentinel,
            city,
        }
    }

    /// Produce one row per request, in request index order
    ///
    /// Chef signups take priority over recurring chefs. Requests without a
    /// supplier, and suppliers without a volunteer record, still yield a row
    /// with the sentinel in the unresolved fields.
    pub fn join(
        &self,
        requests: &KeyedIndex,
        chef_signups: &KeyedIndex,
        recurring_chefs: &KeyedIndex,
        volunteers: &KeyedIndex,
    ) -> JoinOutput {
        let mut output = JoinOutput {
            rows: Vec::with_capacity(requests.len()),
            ..JoinOutput::default()
        };
        let date = self.window.start_civil();

        for (id, request) in requests {
            let pickup = self.resolve_pickup(id, chef_signups, recurring_chefs, volunteers);
            match pickup.source {
                None => output.unresolved_suppliers += 1,
                Some(_) if pickup.intersection == self.sentinel => {
                    log::debug!(
                        "No volunteer record for contact '{}' (request {})",
                        pickup.contact,
                        id
                    );
                    output.unresolved_volunteers += 1
                }
                Some(_) => {}
            }

            let cols = &self.columns.requests;
            let delivery_intersection = request.trimmed(cols.intersection);

            output.rows.push(LogisticsRow {
                request_id: id.clone(),
                date,
                pickup_contact: truncate_name(&pickup.contact),
                pickup_map: map_link(&pickup.intersection, self.city, self.sentinel),
                pickup_intersection: pickup.intersection,
                pickup_time: pickup.time,
                delivery_map: map_link(&delivery_intersection, self.city, self.sentinel),
                delivery_intersection,
                delivery_zone: request.cell(cols.zone),
                delivery_notes: request.cell(cols.notes),
                supplier: pickup.source,
            });
        }

        output
    }

    fn resolve_pickup(
        &self,
        id: &str,
        chef_signups: &KeyedIndex,
        recurring_chefs: &KeyedIndex,
        volunteers: &KeyedIndex,
    ) -> Pickup {
        let supplier: Option<(&Row, &SupplierColumns, SupplierSource)> = chef_signups
            .get(id)
            .map(|row| (row, &self.columns.chef_signups, SupplierSource::ChefSignup))
            .or_else(|| {
                recurring_chefs
                    .get(id)
                    .map(|row| (row, &self.columns.recurring_chefs, SupplierSource::RecurringChef))
            });

        let Some((row, cols, source)) = supplier else {
            return Pickup {
                contact: self.sentinel.to_string(),
                intersection: self.sentinel.to_string(),
                time: CellValue::String(self.sentinel.to_string()),
                source: None,
            };
        };

        let contact = row.trimmed(cols.contact);
        let intersection = volunteers
            .get(contact.as_str())
            .map(|volunteer| volunteer.trimmed(self.columns.volunteers.intersection))
            .unwrap_or_else(|| self.sentinel.to_string());

        Pickup {
            contact,
            intersection,
            time: row.cell(cols.pickup_time),
            source: Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::map_url;
    use crate::index::build_index;
    use crate::layout::{RequestLayout, SupplierLayout, VolunteerLayout};
    use chrono::Utc;

    const NA: &str = "DATA_NOT_FOUND";

    fn columns() -> JoinColumns {
        JoinColumns {
            requests: RequestLayout::default().resolve().unwrap(),
            chef_signups: SupplierLayout::chef_signups().resolve().unwrap(),
            recurring_chefs: SupplierLayout::recurring_chefs().resolve().unwrap(),
            volunteers: VolunteerLayout::default().resolve().unwrap(),
        }
    }

    fn window() -> DateWindow {
        let now = chrono::DateTime::parse_from_rfc3339("2024-05-01T14:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        DateWindow::current(now, 4).unwrap()
    }

    /// Row with `values` placed at the given zero-based columns
    fn sparse_row(values: &[(usize, &str)]) -> Row {
        let width = values.iter().map(|(c, _)| c + 1).max().unwrap_or(0);
        let mut cells = vec![CellValue::Empty; width];
        for (col, value) in values {
            cells[*col] = CellValue::from(*value);
        }
        Row::new(0, cells)
    }

    fn requests() -> KeyedIndex {
        let c = columns().requests;
        build_index(
            &[sparse_row(&[
                (c.id, "R1"),
                (c.intersection, "Main & King"),
                (c.zone, "Downtown"),
                (c.notes, "Ring bell"),
            ])],
            c.id,
        )
    }

    fn chef_signups(contact: &str, time: &str) -> KeyedIndex {
        let c = columns().chef_signups;
        build_index(
            &[sparse_row(&[(c.request_id, "R1"), (c.contact, contact), (c.pickup_time, time)])],
            c.request_id,
        )
    }

    fn recurring_chefs(contact: &str, time: &str) -> KeyedIndex {
        let c = columns().recurring_chefs;
        build_index(
            &[sparse_row(&[(c.request_id, "R1"), (c.contact, contact), (c.pickup_time, time)])],
            c.request_id,
        )
    }

    fn volunteers() -> KeyedIndex {
        let c = columns().volunteers;
        build_index(
            &[
                sparse_row(&[(c.contact, "Jane Doe"), (c.intersection, "Queen & Spadina")]),
                sparse_row(&[(c.contact, "Sam Lee"), (c.intersection, "Bloor & Bathurst")]),
            ],
            c.contact,
        )
    }

    fn formula_for(intersection: &str) -> CellValue {
        CellValue::Formula(format!(
            "=HYPERLINK(\"{}\", \"View on Google Maps\")",
            map_url(intersection, "Toronto")
        ))
    }

    #[test]
    fn test_join_end_to_end_row() {
        let w = window();
        let joiner = LogisticsJoiner::new(columns(), &w, NA, "Toronto");
        let output = joiner.join(
            &requests(),
            &chef_signups(" Jane Doe ", "10:00"),
            &KeyedIndex::new(),
            &volunteers(),
        );

        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.unresolved_suppliers, 0);
        assert_eq!(output.unresolved_volunteers, 0);
        assert_eq!(
            output.rows[0].to_cells(),
            vec![
                CellValue::from("R1"),
                CellValue::DateTime(w.start_civil()),
                CellValue::from("Jane D"),
                CellValue::from("Queen & Spadina"),
                formula_for("Queen & Spadina"),
                CellValue::from("10:00"),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Empty,
                CellValue::from("Main & King"),
                CellValue::from("Downtown"),
                formula_for("Main & King"),
                CellValue::from("Ring bell"),
            ]
        );
    }

    #[test]
    fn test_chef_signup_takes_priority() {
        let w = window();
        let joiner = LogisticsJoiner::new(columns(), &w, NA, "Toronto");
        let output = joiner.join(
            &requests(),
            &chef_signups("Jane Doe", "10:00"),
            &recurring_chefs("Sam Lee", "15:30"),
            &volunteers(),
        );

        let row = &output.rows[0];
        assert_eq!(row.supplier, Some(SupplierSource::ChefSignup));
        assert_eq!(row.pickup_contact, "Jane D");
        assert_eq!(row.pickup_time, CellValue::from("10:00"));
        assert_eq!(row.pickup_intersection, "Queen & Spadina");
    }

    #[test]
    fn test_recurring_chef_uses_its_own_columns() {
        let w = window();
        let joiner = LogisticsJoiner::new(columns(), &w, NA, "Toronto");
        let output = joiner.join(
            &requests(),
            &KeyedIndex::new(),
            &recurring_chefs("Sam Lee", "15:30"),
            &volunteers(),
        );

        let row = &output.rows[0];
        assert_eq!(row.supplier, Some(SupplierSource::RecurringChef));
        assert_eq!(row.pickup_contact, "Sam L");
        assert_eq!(row.pickup_time, CellValue::from("15:30"));
        assert_eq!(row.pickup_intersection, "Bloor & Bathurst");
    }

    #[test]
    fn test_missing_supplier_propagates_sentinel() {
        let w = window();
        let joiner = LogisticsJoiner::new(columns(), &w, NA, "Toronto");
        let output = joiner.join(&requests(), &KeyedIndex::new(), &KeyedIndex::new(), &volunteers());

        let row = &output.rows[0];
        assert_eq!(output.unresolved_suppliers, 1);
        assert_eq!(output.unresolved_volunteers, 0);
        assert_eq!(row.supplier, None);
        assert_eq!(row.pickup_contact, NA);
        assert_eq!(row.pickup_intersection, NA);
        assert_eq!(row.pickup_time, CellValue::from(NA));
        assert_eq!(row.pickup_map, CellValue::from(NA));
        // Delivery side is unaffected
        assert_eq!(row.delivery_map, formula_for("Main & King"));
    }

    #[test]
    fn test_missing_volunteer_keeps_supplier_fields() {
        let w = window();
        let joiner = LogisticsJoiner::new(columns(), &w, NA, "Toronto");
        let output = joiner.join(
            &requests(),
            &chef_signups("Madonna", "09:15"),
            &KeyedIndex::new(),
            &volunteers(),
        );

        let row = &output.rows[0];
        assert_eq!(output.unresolved_volunteers, 1);
        assert_eq!(row.pickup_contact, "Madonna");
        assert_eq!(row.pickup_time, CellValue::from("09:15"));
        assert_eq!(row.pickup_intersection, NA);
        assert_eq!(row.pickup_map, CellValue::from(NA));
    }

    #[test]
    fn test_rows_follow_request_order() {
        let c = columns().requests;
        let requests = build_index(
            &[
                sparse_row(&[(c.id, "R3")]),
                sparse_row(&[(c.id, "R1")]),
                sparse_row(&[(c.id, "R2")]),
            ],
            c.id,
        );
        let w = window();
        let joiner = LogisticsJoiner::new(columns(), &w, NA, "Toronto");
        let output = joiner.join(&requests, &KeyedIndex::new(), &KeyedIndex::new(), &KeyedIndex::new());

        let ids: Vec<_> = output.rows.iter().map(|r| r.request_id.as_str()).collect();
        assert_eq!(ids, vec!["R3", "R1", "R2"]);
        assert!(output.rows.iter().all(|r| r.to_cells().len() == LOGISTICS_WIDTH));
        assert!(output.rows.iter().all(|r| r.delivery_map.is_empty()));
    }
}
