//! Resgrid - calendar layout for restaurant reservations.
//!
//! Reservation rows are ingested into calendar events, grouped into
//! non-overlapping columns per day and placed on a time grid. A small
//! statistics module computes the dashboard figures over the same rows.
//!
//! # Modules
//!
//! - [`ingest`] - Row parsing, validation and day partitioning.
//! - [`layout`] - Column engines and grid positioning.
//! - [`calendar`] - Day and week views through [`CalendarBuilder`].
//! - [`stats`] - Daily series, period trends and status breakdowns.
//! - [`config`] - Deserializable configuration.

pub mod calendar;
pub mod config;
pub mod ingest;
pub mod layout;
pub mod stats;

mod error;

pub use resgrid_core::{color, event, status, time};

pub use calendar::CalendarBuilder;
pub use error::ResgridError;
