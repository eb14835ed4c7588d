//! Reservation statuses and their calendar palette.
//!
//! Statuses arrive as free-form strings from the reservation store. Known
//! values are matched case-insensitively; anything else is kept verbatim as
//! [`ReservationStatus::Other`] and rendered with the muted default style.

use std::{
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
};

use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::Color;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Arrived,
    Cancelled,
    Waiting,
    Completed,
    Deposited,
    /// Any status string the dashboard does not know about.
    Other(String),
}

impl ReservationStatus {
    /// The configured string form, lowercase for known statuses.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Arrived => "arrived",
            Self::Cancelled => "cancelled",
            Self::Waiting => "waiting",
            Self::Completed => "completed",
            Self::Deposited => "deposited",
            Self::Other(s) => s,
        }
    }

    /// Whether the reservation still holds its table.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Palette used to draw this status on the calendar.
    pub fn style(&self) -> StatusStyle {
        let (background, border, text) = match self {
            Self::Confirmed => ("#bbf7d0", "#4ade80", "#166534"),
            Self::Pending => ("#fed7aa", "#fb923c", "#9a3412"),
            Self::Arrived => ("#bfdbfe", "#60a5fa", "#1e40af"),
            Self::Cancelled => ("#fecaca", "#f87171", "#991b1b"),
            Self::Waiting => ("#fef08a", "#facc15", "#854d0e"),
            Self::Completed => ("#d9f99d", "#a3e635", "#3f6212"),
            Self::Deposited => ("#bae6fd", "#38bdf8", "#075985"),
            Self::Other(_) => ("#f4f4f5", "#71717a", "#71717a"),
        };
        StatusStyle::from_hex(background, border, text)
    }
}

impl FromStr for ReservationStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "pending" => Self::Pending,
            "arrived" => Self::Arrived,
            "cancelled" => Self::Cancelled,
            "waiting" => Self::Waiting,
            "completed" => Self::Completed,
            "deposited" => Self::Deposited,
            _ => {
                trace!(status = s; "Unrecognized reservation status");
                Self::Other(s.to_string())
            }
        };
        Ok(status)
    }
}

impl From<&str> for ReservationStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ReservationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Fill, border and text colors for a calendar block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StatusStyle {
    background: Color,
    border: Color,
    text: Color,
}

impl StatusStyle {
    pub fn new(background: Color, border: Color, text: Color) -> Self {
        Self {
            background,
            border,
            text,
        }
    }

    fn from_hex(background: &str, border: &str, text: &str) -> Self {
        let parse = |hex: &str| Color::new(hex).unwrap_or_default();
        Self::new(parse(background), parse(border), parse(text))
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn border(&self) -> Color {
        self.border
    }

    pub fn text(&self) -> Color {
        self.text
    }
}
