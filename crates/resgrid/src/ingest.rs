//! Reservation ingestion.
//!
//! Turns raw reservation rows, as exported by the reservation store, into
//! calendar [`Event`]s carrying [`ReservationDetails`]. This is the boundary
//! where bad data is rejected: unparseable dates or times and spans with
//! `end <= start` never reach the layout engines. Each rejected row is logged
//! and reported back to the caller as a [`Rejection`].

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::Path,
    str::FromStr,
};

use chrono::{NaiveDate, NaiveTime};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use resgrid_core::{
    event::Event,
    status::ReservationStatus,
    time::{TimeSpan, TimeSpanError},
};

use crate::error::ResgridError;

pub(crate) const UNKNOWN: &str = "Unknown";
pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Why a single reservation row could not become an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("invalid reservation date `{0}`")]
    InvalidDate(String),

    #[error("invalid time of day `{0}`")]
    InvalidTime(String),

    #[error("invalid reservation span: {0}")]
    InvalidSpan(#[from] TimeSpanError),
}

/// Restaurant identifier, stored upstream either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RestaurantId {
    Number(i64),
    Text(String),
}

impl RestaurantId {
    /// Numeric form of the id, if it has one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A row of the `reservations` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReservationRecord {
    pub reservation_id: i64,
    pub user_id: String,
    pub restaurant_id: RestaurantId,
    pub table_id: i64,
    pub guest_count: u32,
    /// `YYYY-MM-DD`, optionally followed by a `T...` time part that is ignored.
    pub reservation_date: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// A row of the `restaurants` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RestaurantRecord {
    pub id: RestaurantId,
    pub name: String,
}

/// The exported reservation store: reservations plus lookup tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    reservations: Option<Vec<ReservationRecord>>,
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    restaurants: Vec<RestaurantRecord>,
}

impl Dataset {
    pub fn new(
        reservations: Vec<ReservationRecord>,
        users: Vec<UserRecord>,
        restaurants: Vec<RestaurantRecord>,
    ) -> Self {
        Self {
            reservations: Some(reservations),
            users,
            restaurants,
        }
    }

    /// Parse a dataset from its JSON export.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::Json`] for malformed JSON or rows.
    pub fn from_json(source: &str) -> Result<Self, ResgridError> {
        let dataset: Self = serde_json::from_str(source)?;
        debug!(
            reservations = dataset.reservations.as_ref().map_or(0, Vec::len),
            users = dataset.users.len(),
            restaurants = dataset.restaurants.len();
            "Dataset parsed"
        );
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::Io`] if the file cannot be read and
    /// [`ResgridError::Json`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResgridError> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// The reservation rows.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::InvalidArgument`] when the export has no
    /// `reservations` key at all. An empty list is valid.
    pub fn reservations(&self) -> Result<&[ReservationRecord], ResgridError> {
        self.reservations.as_deref().ok_or_else(|| {
            ResgridError::InvalidArgument("dataset has no `reservations` list".to_string())
        })
    }

    /// Lookup tables over this dataset's users and restaurants.
    pub fn directory(&self) -> Directory<'_> {
        Directory::new(&self.users, &self.restaurants)
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn restaurants(&self) -> &[RestaurantRecord] {
        &self.restaurants
    }
}

/// Lookup tables used to resolve display names for reservations.
#[derive(Debug, Default)]
pub struct Directory<'a> {
    users: HashMap<&'a str, &'a UserRecord>,
    restaurants: HashMap<i64, &'a RestaurantRecord>,
}

impl<'a> Directory<'a> {
    /// Index users by id and restaurants by numeric id.
    ///
    /// Restaurants whose id is not numeric cannot be matched by reservations
    /// and are left out.
    pub fn new(users: &'a [UserRecord], restaurants: &'a [RestaurantRecord]) -> Self {
        let users = users.iter().map(|user| (user.id.as_str(), user)).collect();
        let restaurants = restaurants
            .iter()
            .filter_map(|restaurant| Some((restaurant.id.as_number()?, restaurant)))
            .collect();
        Self { users, restaurants }
    }

    pub fn user(&self, id: &str) -> Option<&'a UserRecord> {
        self.users.get(id).copied()
    }

    pub fn restaurant(&self, id: &RestaurantId) -> Option<&'a RestaurantRecord> {
        self.restaurants.get(&id.as_number()?).copied()
    }
}

/// Display metadata carried by a reservation event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationDetails {
    pub user_id: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: String,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: String,
    pub table_id: i64,
    pub guest_count: u32,
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

/// A calendar event built from a reservation row, keyed by reservation id.
pub type ReservationEvent = Event<i64, ReservationDetails>;

/// Which restaurant's reservations to keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantFilter {
    #[default]
    All,
    Only(i64),
}

impl RestaurantFilter {
    pub fn matches(&self, record: &ReservationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => record.restaurant_id.as_number() == Some(*id),
        }
    }
}

impl FromStr for RestaurantFilter {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            other => other
                .parse()
                .map(Self::Only)
                .map_err(|_| "Restaurant filter must be `all` or a numeric id"),
        }
    }
}

/// A reservation row that was dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reservation_id: i64,
    pub reason: IngestError,
}

/// Outcome of ingesting a batch of rows.
#[derive(Debug, Default)]
pub struct Ingested {
    events: Vec<ReservationEvent>,
    rejections: Vec<Rejection>,
}

impl Ingested {
    /// Accepted events, in input order.
    pub fn events(&self) -> &[ReservationEvent] {
        &self.events
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn into_events(self) -> Vec<ReservationEvent> {
        self.events
    }
}

/// Parse a reservation date, ignoring any `T...` suffix.
pub fn parse_date(value: &str) -> Result<NaiveDate, IngestError> {
    let date_part = value.split('T').next().unwrap_or_default().trim();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| IngestError::InvalidDate(value.to_string()))
}

/// Parse a time of day in `HH:MM:SS` or `HH:MM` form.
pub fn parse_time(value: &str) -> Result<NaiveTime, IngestError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| IngestError::InvalidTime(value.to_string()))
}

/// Build a calendar event from one reservation row.
///
/// Missing users or restaurants do not fail the row; their display fields
/// fall back to `"Unknown"` and `"N/A"`.
///
/// # Errors
///
/// Returns [`IngestError`] if the date or a time cannot be parsed, or if the
/// reservation does not end after it starts.
pub fn to_event(
    record: &ReservationRecord,
    directory: &Directory<'_>,
) -> Result<ReservationEvent, IngestError> {
    let date = parse_date(&record.reservation_date)?;
    let start = date.and_time(parse_time(&record.start_time)?);
    let end = date.and_time(parse_time(&record.end_time)?);
    let span = TimeSpan::try_new(start, end)?;

    let user = directory.user(&record.user_id);
    let restaurant = directory.restaurant(&record.restaurant_id);

    let details = ReservationDetails {
        user_id: record.user_id.clone(),
        user_name: user.map_or(UNKNOWN, |u| u.name.as_str()).to_string(),
        user_phone: user
            .and_then(|u| u.phone_number.as_deref())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        user_email: user
            .and_then(|u| u.email.as_deref())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        restaurant_id: record.restaurant_id.as_number(),
        restaurant_name: restaurant.map_or(UNKNOWN, |r| r.name.as_str()).to_string(),
        table_id: record.table_id,
        guest_count: record.guest_count,
        status: ReservationStatus::from(record.status.as_str()),
        notes: record.notes.clone(),
    };

    Ok(Event::new(record.reservation_id, span, details))
}

/// Convert every row that passes `filter` into an event.
///
/// Rows that cannot be converted are dropped with a warning and listed in
/// [`Ingested::rejections`]; the rest keep their input order.
pub fn ingest(
    records: &[ReservationRecord],
    directory: &Directory<'_>,
    filter: RestaurantFilter,
) -> Ingested {
    let mut ingested = Ingested::default();

    for record in records.iter().filter(|record| filter.matches(record)) {
        match to_event(record, directory) {
            Ok(event) => ingested.events.push(event),
            Err(reason) => {
                warn!(
                    reservation_id = record.reservation_id,
                    reason:% = reason;
                    "Dropping reservation"
                );
                ingested.rejections.push(Rejection {
                    reservation_id: record.reservation_id,
                    reason,
                });
            }
        }
    }

    info!(
        accepted = ingested.events.len(),
        rejected = ingested.rejections.len();
        "Reservations ingested"
    );

    ingested
}

/// Split events by calendar day, keeping input order within each day.
pub fn partition_by_day<Id, P>(
    events: impl IntoIterator<Item = Event<Id, P>>,
) -> BTreeMap<NaiveDate, Vec<Event<Id, P>>> {
    let mut days: BTreeMap<NaiveDate, Vec<Event<Id, P>>> = BTreeMap::new();
    for event in events {
        days.entry(event.date()).or_default().push(event);
    }
    days
}

/// Calendar days that have at least one event.
pub fn days_with_events<Id, P>(events: &[Event<Id, P>]) -> BTreeSet<NaiveDate> {
    events.iter().map(Event::date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, date: &str, start: &str, end: &str) -> ReservationRecord {
        ReservationRecord {
            reservation_id: id,
            user_id: "u1".to_string(),
            restaurant_id: RestaurantId::Number(1),
            table_id: 4,
            guest_count: 2,
            reservation_date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            status: "Confirmed".to_string(),
            notes: None,
        }
    }

    fn users() -> Vec<UserRecord> {
        vec![UserRecord {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            phone_number: None,
        }]
    }

    fn restaurants() -> Vec<RestaurantRecord> {
        vec![
            RestaurantRecord {
                id: RestaurantId::Text("1".to_string()),
                name: "Harbor".to_string(),
            },
            RestaurantRecord {
                id: RestaurantId::Text("main".to_string()),
                name: "Unreachable".to_string(),
            },
        ]
    }

    #[test]
    fn test_parse_date_ignores_time_suffix() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
        assert_eq!(parse_date("2025-03-29"), Ok(expected));
        assert_eq!(parse_date("2025-03-29T00:00:00+00:00"), Ok(expected));
        assert!(matches!(parse_date("29/03/2025"), Err(IngestError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_time_accepts_seconds() {
        let expected = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        assert_eq!(parse_time("18:30"), Ok(expected));
        assert_eq!(parse_time("18:30:00"), Ok(expected));
        assert!(matches!(parse_time("6pm"), Err(IngestError::InvalidTime(_))));
    }

    #[test]
    fn test_to_event_resolves_display_fields() {
        let (users, restaurants) = (users(), restaurants());
        let directory = Directory::new(&users, &restaurants);

        let event = to_event(&record(7, "2025-03-29", "18:00", "20:00"), &directory).unwrap();

        assert_eq!(*event.id(), 7);
        assert_eq!(event.span().duration_minutes(), 120);
        let details = event.payload();
        assert_eq!(details.user_name, "Alice");
        assert_eq!(details.user_phone, "N/A");
        assert_eq!(details.user_email, "alice@example.com");
        assert_eq!(details.restaurant_name, "Harbor");
        assert_eq!(details.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_to_event_with_unknown_user() {
        let directory = Directory::default();
        let event = to_event(&record(1, "2025-03-29", "12:00", "13:00"), &directory).unwrap();

        assert_eq!(event.payload().user_name, "Unknown");
        assert_eq!(event.payload().restaurant_name, "Unknown");
    }

    #[test]
    fn test_ingest_rejects_invalid_spans() {
        let records = vec![
            record(1, "2025-03-29", "18:00", "19:00"),
            record(2, "2025-03-29", "19:00", "19:00"),
            record(3, "2025-03-29", "20:00", "19:00"),
            record(4, "not-a-date", "18:00", "19:00"),
        ];

        let ingested = ingest(&records, &Directory::default(), RestaurantFilter::All);

        assert_eq!(ingested.events().len(), 1);
        let rejected: Vec<i64> = ingested
            .rejections()
            .iter()
            .map(|r| r.reservation_id)
            .collect();
        assert_eq!(rejected, vec![2, 3, 4]);
        assert!(matches!(
            ingested.rejections()[0].reason,
            IngestError::InvalidSpan(TimeSpanError::Empty(_))
        ));
    }

    #[test]
    fn test_ingest_filters_by_restaurant() {
        let mut other = record(2, "2025-03-29", "18:00", "19:00");
        other.restaurant_id = RestaurantId::Text("2".to_string());
        let records = vec![record(1, "2025-03-29", "18:00", "19:00"), other];

        let only_two = ingest(&records, &Directory::default(), RestaurantFilter::Only(2));
        let ids: Vec<i64> = only_two.events().iter().map(|e| *e.id()).collect();
        assert_eq!(ids, vec![2]);

        let all = ingest(&records, &Directory::default(), RestaurantFilter::All);
        assert_eq!(all.events().len(), 2);
    }

    #[test]
    fn test_restaurant_filter_from_str() {
        assert_eq!("all".parse::<RestaurantFilter>(), Ok(RestaurantFilter::All));
        assert_eq!("12".parse::<RestaurantFilter>(), Ok(RestaurantFilter::Only(12)));
        assert!("harbor".parse::<RestaurantFilter>().is_err());
    }

    #[test]
    fn test_partition_by_day_keeps_order() {
        let records = vec![
            record(1, "2025-03-30", "18:00", "19:00"),
            record(2, "2025-03-29", "20:00", "21:00"),
            record(3, "2025-03-30", "12:00", "13:00"),
        ];
        let events = ingest(&records, &Directory::default(), RestaurantFilter::All).into_events();

        let days = partition_by_day(events);

        let ids: Vec<Vec<i64>> = days
            .values()
            .map(|events| events.iter().map(|e| *e.id()).collect())
            .collect();
        assert_eq!(ids, vec![vec![2], vec![1, 3]]);
    }

    #[test]
    fn test_days_with_events() {
        let records = vec![
            record(1, "2025-03-30", "18:00", "19:00"),
            record(2, "2025-03-30", "20:00", "21:00"),
        ];
        let ingested = ingest(&records, &Directory::default(), RestaurantFilter::All);

        let days = days_with_events(ingested.events());
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn test_dataset_from_json() {
        let json = r#"{
            "reservations": [{
                "reservation_id": 1,
                "user_id": "u1",
                "restaurant_id": "3",
                "table_id": 2,
                "guest_count": 4,
                "reservation_date": "2025-03-29",
                "start_time": "18:00:00",
                "end_time": "20:00:00",
                "status": "pending"
            }],
            "restaurants": [{ "id": 3, "name": "Harbor" }]
        }"#;

        let dataset = Dataset::from_json(json).unwrap();
        let records = dataset.reservations().unwrap();
        assert_eq!(records[0].restaurant_id.as_number(), Some(3));

        let directory = dataset.directory();
        let event = to_event(&records[0], &directory).unwrap();
        assert_eq!(event.payload().restaurant_name, "Harbor");
        assert_eq!(event.payload().notes, None);
    }

    #[test]
    fn test_dataset_without_reservations_is_invalid() {
        let dataset = Dataset::from_json(r#"{ "users": [] }"#).unwrap();
        assert!(matches!(
            dataset.reservations(),
            Err(ResgridError::InvalidArgument(_))
        ));

        let empty = Dataset::from_json(r#"{ "reservations": [] }"#).unwrap();
        assert!(empty.reservations().unwrap().is_empty());
    }
}
