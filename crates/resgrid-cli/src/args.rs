//! Command-line argument definitions for the resgrid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input export, the calendar view and
//! its filters, the configuration file and logging verbosity.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use resgrid::{ingest::RestaurantFilter, layout::LayoutEngine, stats::TimeRange};

/// Which view to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Layout of a single day
    Day,
    /// Layout of the week containing the date
    Week,
    /// Dashboard statistics ending at the date
    Stats,
}

/// Command-line arguments for the resgrid calendar tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the reservation export (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Reference date (YYYY-MM-DD), today if omitted
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// View to compute
    #[arg(long, value_enum, default_value_t = View::Week)]
    pub view: View,

    /// Restaurant to show (`all` or a numeric id)
    #[arg(short, long, default_value = "all")]
    pub restaurant: RestaurantFilter,

    /// Trailing range for statistics (7d, 30d, 90d)
    #[arg(long, default_value = "90d")]
    pub range: TimeRange,

    /// Column engine override (greedy, sweep)
    #[arg(long)]
    pub engine: Option<LayoutEngine>,

    /// Path to the output JSON file, stdout if omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
