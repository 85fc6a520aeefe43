use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};
use pantry_logistics::{run, CsvWorkbook, LogisticsConfig, TabSpec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pantry-logistics")]
#[command(about = "Build tomorrow's pickup and delivery sheet from the request, chef and volunteer workbooks", long_about = None)]
struct Cli {
    /// Directory holding one sub-directory of CSV tabs per workbook
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Workbook the logistics tab is written to
    #[arg(long)]
    target_workbook: Option<String>,

    /// Tab the logistics rows are written to
    #[arg(long)]
    target_tab: Option<String>,

    /// Hours the local timezone is behind UTC
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Compute the window as if run at this RFC 3339 instant
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Also join the groceries requests tab
    #[arg(long)]
    include_groceries: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut config = LogisticsConfig::default().with_groceries(cli.include_groceries);
    if let Some(hours) = cli.utc_offset {
        config = config.with_utc_offset(hours);
    }
    if cli.target_workbook.is_some() || cli.target_tab.is_some() {
        let target = TabSpec::new(
            cli.target_workbook.unwrap_or(config.target.workbook.clone()),
            cli.target_tab.unwrap_or(config.target.tab.clone()),
        );
        config = config.with_target(target);
    }

    let mut source = CsvWorkbook::new(&cli.data_dir, config.utc_offset_hours)
        .context("Invalid UTC offset")?;
    let mut writer = source.clone();
    let now = cli.now.unwrap_or_else(Utc::now);

    let summary = run(&config, &mut source, &mut writer, now).with_context(|| {
        format!(
            "Logistics run failed (data directory {})",
            cli.data_dir.display()
        )
    })?;

    println!(
        "Wrote {} rows to '{}' {} for {}",
        summary.rows_written(),
        config.target.tab,
        summary.range,
        summary.window.start_civil().format("%Y-%m-%d")
    );
    if summary.unresolved_suppliers > 0 || summary.unresolved_volunteers > 0 {
        println!(
            "{} without a supplier, {} without a volunteer pickup location",
            summary.unresolved_suppliers, summary.unresolved_volunteers
        );
    }

    Ok(())
}
