//! CLI logic for the resgrid calendar tool.
//!
//! Reads a reservation export, lays out the requested day or week (or
//! computes dashboard statistics) and writes the result as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, View};

use std::{collections::BTreeMap, fs, io::Write};

use chrono::{Local, NaiveDate};
use log::info;
use serde::Serialize;

use resgrid::{
    CalendarBuilder, ResgridError,
    ingest::{self, Dataset},
    stats::{self, CustomerSummary, DailyPoint, PeriodSummary, TimeRange},
};

/// Statistics view written for `--view stats`.
#[derive(Debug, Serialize)]
struct StatsReport {
    range: TimeRange,
    label: &'static str,
    reference: NaiveDate,
    summary: PeriodSummary,
    active_users: usize,
    series: Vec<DailyPoint>,
    statuses: BTreeMap<String, usize>,
    customers: Vec<CustomerSummary>,
}

/// Run the resgrid CLI application
///
/// This function loads the reservation export, computes the requested view
/// and writes it as pretty-printed JSON to the output file or stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ResgridError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Malformed input JSON
/// - Input without a reservations list
/// - A week view for a date whose week is not representable
pub fn run(args: &Args) -> Result<(), ResgridError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing reservations"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = args.engine {
        app_config = app_config.with_engine(engine);
    }
    let builder = CalendarBuilder::new(app_config)?;

    let dataset = Dataset::from_path(&args.input)?;
    let records = dataset.reservations()?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let json = match args.view {
        View::Stats => {
            let report = StatsReport {
                range: args.range,
                label: args.range.label(),
                reference: date,
                summary: stats::period_summary(records, args.range, date),
                active_users: stats::active_users(records, args.range, date),
                series: stats::daily_series(records, args.range, date),
                statuses: stats::status_breakdown(records),
                customers: stats::customer_summaries(dataset.users(), records),
            };
            serde_json::to_string_pretty(&report)?
        }
        View::Day | View::Week => {
            let directory = dataset.directory();
            let ingested = ingest::ingest(records, &directory, args.restaurant);
            if !ingested.rejections().is_empty() {
                info!(rejected = ingested.rejections().len(); "Some reservations were not placed");
            }

            if args.view == View::Day {
                serde_json::to_string_pretty(&builder.layout_day(date, ingested.events()))?
            } else {
                let window = builder.week_of(date)?;
                serde_json::to_string_pretty(&builder.layout_week(window, ingested.events()))?
            }
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file:% = path; "Layout exported successfully");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
