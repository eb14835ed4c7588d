//! Calendar events.
//!
//! An [`Event`] is one reservation's occupancy of a [`TimeSpan`]. The
//! identifier is used as a map key by the layout engines; the payload carries
//! display metadata that nothing in the layout path inspects.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::time::TimeSpan;

/// A time-bounded calendar event with an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event<Id, P = ()> {
    id: Id,
    span: TimeSpan,
    payload: P,
}

impl<Id> Event<Id, ()> {
    /// Create an event without display metadata.
    pub fn bare(id: Id, span: TimeSpan) -> Self {
        Self::new(id, span, ())
    }
}

impl<Id, P> Event<Id, P> {
    pub fn new(id: Id, span: TimeSpan, payload: P) -> Self {
        Self { id, span, payload }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn span(&self) -> &TimeSpan {
        &self.span
    }

    pub fn start(&self) -> NaiveDateTime {
        self.span.start()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.span.end()
    }

    /// Calendar day the event belongs to.
    pub fn date(&self) -> NaiveDate {
        self.span.date()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Replace the payload, keeping identifier and span.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Event<Id, Q> {
        Event {
            id: self.id,
            span: self.span,
            payload: f(self.payload),
        }
    }

    /// Whether the two events share any instant.
    pub fn overlaps<Q>(&self, other: &Event<Id, Q>) -> bool {
        self.span.overlaps(&other.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start_h: u32, end_h: u32) -> TimeSpan {
        let day = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
        TimeSpan::new(
            day.and_hms_opt(start_h, 0, 0).unwrap(),
            day.and_hms_opt(end_h, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_map_payload_keeps_identity() {
        let event = Event::new(7, span(18, 20), "Alice");
        let mapped = event.map_payload(str::len);

        assert_eq!(*mapped.id(), 7);
        assert_eq!(*mapped.span(), span(18, 20));
        assert_eq!(*mapped.payload(), 5);
    }

    #[test]
    fn test_overlaps_ignores_payload_type() {
        let a = Event::bare("a", span(10, 12));
        let b = Event::new("b", span(11, 13), 4u32);
        assert!(a.overlaps(&b));
    }
}
