//! A complete logistics run: fetch, filter, index, join, write

use crate::column::range_label;
use crate::config::{LogisticsConfig, TabSpec};
use crate::error::Result;
use crate::filter::filter_by_date;
use crate::index::{build_index, merge_index, KeyedIndex};
use crate::join::{JoinColumns, LogisticsJoiner, LogisticsRow, LOGISTICS_WIDTH};
use crate::reader::TabularSource;
use crate::types::Grid;
use crate::window::DateWindow;
use crate::writer::SheetWriter;
use chrono::{DateTime, Utc};

/// What a run produced
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunSummary {
    pub window: DateWindow,
    pub rows: Vec<LogisticsRow>,
    pub unresolved_suppliers: usize,
    pub unresolved_volunteers: usize,
    /// A1 range the rows were written to
    pub range: String,
}

impl RunSummary {
    pub fn rows_written(&self) -> usize {
        self.rows.len()
    }
}

fn fetch(source: &mut impl TabularSource, spec: &TabSpec) -> Result<Grid> {
    source.fetch(&spec.workbook, &spec.tab)
}

/// Run the join for the window containing `now` and write the result
///
/// The window is computed once and shared by every filter. Column layouts and
/// the anchor are validated before any tab is fetched, and nothing is written
/// unless every fetch succeeded.
pub fn run<S, W>(
    config: &LogisticsConfig,
    source: &mut S,
    writer: &mut W,
    now: DateTime<Utc>,
) -> Result<RunSummary>
where
    S: TabularSource,
    W: SheetWriter,
{
    let columns = JoinColumns {
        requests: config.request_layout.resolve()?,
        chef_signups: config.chef_signup_layout.resolve()?,
        recurring_chefs: config.recurring_chef_layout.resolve()?,
        volunteers: config.volunteer_layout.resolve()?,
    };
    let anchor = config.anchor_ref()?;
    let window = DateWindow::current(now, config.utc_offset_hours)?;
    log::info!(
        "Collecting logistics for window {} .. {}",
        window.start.to_rfc3339(),
        window.end.to_rfc3339()
    );

    let request_index = |grid: Grid| -> KeyedIndex {
        let filtered = filter_by_date(&grid, columns.requests.date, &window);
        build_index(&filtered, columns.requests.id)
    };

    let mut requests = request_index(fetch(source, &config.meals)?);
    if config.include_groceries {
        let groceries = request_index(fetch(source, &config.groceries)?);
        merge_index(&mut requests, groceries);
    }

    let recurring = fetch(source, &config.recurring_chefs)?;
    let recurring_chefs = build_index(
        &filter_by_date(&recurring, columns.recurring_chefs.date, &window),
        columns.recurring_chefs.request_id,
    );

    let signups = fetch(source, &config.chef_signups)?;
    let chef_signups = build_index(
        &filter_by_date(&signups, columns.chef_signups.date, &window),
        columns.chef_signups.request_id,
    );

    let volunteers = build_index(
        &fetch(source, &config.volunteers)?,
        columns.volunteers.contact,
    );

    log::info!(
        "{} requests, {} chef signups, {} recurring chefs, {} volunteers",
        requests.len(),
        chef_signups.len(),
        recurring_chefs.len(),
        volunteers.len()
    );

    let joiner = LogisticsJoiner::new(columns, &window, &config.sentinel, &config.city);
    let output = joiner.join(&requests, &chef_signups, &recurring_chefs, &volunteers);
    if output.unresolved_suppliers > 0 || output.unresolved_volunteers > 0 {
        log::info!(
            "{} requests without a supplier, {} suppliers without a volunteer record",
            output.unresolved_suppliers,
            output.unresolved_volunteers
        );
    }

    let cells: Vec<_> = output.rows.iter().map(LogisticsRow::to_cells).collect();
    writer.write(&config.target.workbook, &config.target.tab, anchor, &cells)?;

    Ok(RunSummary {
        window,
        range: range_label(anchor, cells.len(), LOGISTICS_WIDTH),
        rows: output.rows,
        unresolved_suppliers: output.unresolved_suppliers,
        unresolved_volunteers: output.unresolved_volunteers,
    })
}
