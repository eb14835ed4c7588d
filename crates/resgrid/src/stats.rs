//! Dashboard statistics.
//!
//! Figures shown on the overview cards, the reservations chart and the
//! customer list: a daily series over a trailing time range,
//! period-over-period totals with their trend, a per-status breakdown and
//! per-customer totals. All figures are keyed on the reservation date.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use resgrid_core::status::ReservationStatus;

use crate::ingest::{NOT_AVAILABLE, ReservationRecord, UNKNOWN, UserRecord, parse_date};

/// Trailing window used by the dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[default]
    #[serde(rename = "90d")]
    Last90Days,
}

impl TimeRange {
    /// Length of the window in days.
    pub fn days(&self) -> u64 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 3 months",
        }
    }

    /// First date inside the window ending at `reference`.
    ///
    /// Saturates at the earliest representable date.
    pub fn window_start(&self, reference: NaiveDate) -> NaiveDate {
        reference
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for TimeRange {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            "90d" => Ok(Self::Last90Days),
            _ => Err("Unsupported time range"),
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
        };
        write!(f, "{s}")
    }
}

/// Reservation activity on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub reservations: usize,
    pub guests: u64,
    pub unique_users: usize,
}

/// Totals for a window and the window right before it.
///
/// The current window includes its reference date, so it spans one day more
/// than the previous window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub range: TimeRange,
    pub reservations: usize,
    pub previous_reservations: usize,
    pub reservations_trend: f64,
    pub guests: u64,
    pub previous_guests: u64,
    pub guests_trend: f64,
    pub unique_customers: usize,
    pub previous_unique_customers: usize,
    pub customers_trend: f64,
}

/// Whether a customer has any reservation on record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

/// Reservation totals for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_reservations: usize,
    pub last_reservation_date: Option<NaiveDate>,
    pub status: CustomerStatus,
}

/// Percentage change from `previous` to `current`, rounded to one decimal.
///
/// With no previous activity the trend is 100% if there is any current
/// activity and 0% otherwise.
///
/// # Examples
///
/// ```
/// use resgrid::stats::trend;
///
/// assert_eq!(trend(120.0, 100.0), 20.0);
/// assert_eq!(trend(1.0, 3.0), -66.7);
/// assert_eq!(trend(5.0, 0.0), 100.0);
/// ```
pub fn trend(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    ((current - previous) / previous * 1000.0).round() / 10.0
}

/// Daily counts for dates on or after `range.window_start(reference)`, oldest first.
///
/// Rows with unparseable dates are skipped.
pub fn daily_series(
    records: &[ReservationRecord],
    range: TimeRange,
    reference: NaiveDate,
) -> Vec<DailyPoint> {
    let window_start = range.window_start(reference);
    let mut days: BTreeMap<NaiveDate, (usize, u64, BTreeSet<&str>)> = BTreeMap::new();

    for (record, date) in dated(records) {
        if date < window_start {
            continue;
        }
        let (reservations, guests, users) = days.entry(date).or_default();
        *reservations += 1;
        *guests += u64::from(record.guest_count);
        users.insert(record.user_id.as_str());
    }

    days.into_iter()
        .map(|(date, (reservations, guests, users))| DailyPoint {
            date,
            reservations,
            guests,
            unique_users: users.len(),
        })
        .collect()
}

/// Distinct users with a reservation on or after `range.window_start(reference)`.
///
/// This is the "active users" figure shown next to the daily series.
pub fn active_users(
    records: &[ReservationRecord],
    range: TimeRange,
    reference: NaiveDate,
) -> usize {
    let window_start = range.window_start(reference);
    dated(records)
        .filter(|(_, date)| *date >= window_start)
        .map(|(record, _)| record.user_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Totals for the current window against the previous one.
///
/// With `start = range.window_start(reference)`, the current window is
/// `[start, reference]` (`range.days() + 1` days, both ends inclusive) and the
/// previous window is `[range.window_start(start), start - 1]`
/// (`range.days()` days). The previous window is empty when `start` is the
/// earliest representable date.
pub fn period_summary(
    records: &[ReservationRecord],
    range: TimeRange,
    reference: NaiveDate,
) -> PeriodSummary {
    let start = range.window_start(reference);
    let previous = start
        .pred_opt()
        .map(|previous_end| (range.window_start(start), previous_end));

    let mut current = WindowTotals::default();
    let mut before = WindowTotals::default();

    for (record, date) in dated(records) {
        if start <= date && date <= reference {
            current.add(record);
        } else if previous.is_some_and(|(from, to)| from <= date && date <= to) {
            before.add(record);
        }
    }

    let unique_customers = current.users.len();
    let previous_unique_customers = before.users.len();

    PeriodSummary {
        range,
        reservations: current.reservations,
        previous_reservations: before.reservations,
        reservations_trend: trend(current.reservations as f64, before.reservations as f64),
        guests: current.guests,
        previous_guests: before.guests,
        guests_trend: trend(current.guests as f64, before.guests as f64),
        unique_customers,
        previous_unique_customers,
        customers_trend: trend(unique_customers as f64, previous_unique_customers as f64),
    }
}

#[derive(Default)]
struct WindowTotals<'a> {
    reservations: usize,
    guests: u64,
    users: BTreeSet<&'a str>,
}

impl<'a> WindowTotals<'a> {
    fn add(&mut self, record: &'a ReservationRecord) {
        self.reservations += 1;
        self.guests += u64::from(record.guest_count);
        self.users.insert(record.user_id.as_str());
    }
}

/// Reservation totals for every user, in user order.
///
/// Users without reservations are [`CustomerStatus::Inactive`]. Missing
/// contact details fall back to `"N/A"` and a blank name to `"Unknown"`.
pub fn customer_summaries(
    users: &[UserRecord],
    records: &[ReservationRecord],
) -> Vec<CustomerSummary> {
    let mut totals: HashMap<&str, (usize, Option<NaiveDate>)> = HashMap::new();
    for record in records {
        let (count, last) = totals.entry(record.user_id.as_str()).or_default();
        *count += 1;
        if let Ok(date) = parse_date(&record.reservation_date) {
            *last = (*last).max(Some(date));
        }
    }

    users
        .iter()
        .map(|user| {
            let (total_reservations, last_reservation_date) =
                totals.get(user.id.as_str()).copied().unwrap_or_default();
            let name = if user.name.trim().is_empty() {
                UNKNOWN
            } else {
                user.name.as_str()
            };

            CustomerSummary {
                user_id: user.id.clone(),
                name: name.to_string(),
                email: user.email.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
                phone: user.phone_number.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
                total_reservations,
                last_reservation_date,
                status: if total_reservations > 0 {
                    CustomerStatus::Active
                } else {
                    CustomerStatus::Inactive
                },
            }
        })
        .collect()
}

/// Number of reservations per status, keyed by the normalized status name.
pub fn status_breakdown(records: &[ReservationRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        let status = ReservationStatus::from(record.status.as_str());
        *counts.entry(status.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

fn dated(
    records: &[ReservationRecord],
) -> impl Iterator<Item = (&ReservationRecord, NaiveDate)> {
    records.iter().filter_map(|record| {
        match parse_date(&record.reservation_date) {
            Ok(date) => Some((record, date)),
            Err(err) => {
                debug!(reservation_id = record.reservation_id, err:% = err; "Skipping undated reservation");
                None
            }
        }
    })
}
