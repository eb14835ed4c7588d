//! Day and week calendar views.
//!
//! [`CalendarBuilder`] ties the pieces together: it picks the events that
//! belong to a day, runs the configured column engine over them and attaches
//! the vertical placement of each block. Week views repeat this for each of
//! the seven days in a [`WeekWindow`].

use std::hash::Hash;

use chrono::{Datelike, Days, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use resgrid_core::event::Event;

use crate::{
    config::AppConfig,
    error::ResgridError,
    layout::{
        ColumnEngine, EngineBuilder, LayoutSlot, assign_slots,
        positioning::{self, ColumnBox, Placement},
    },
};

/// First day of a calendar week.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// The first day of the week containing `date`.
///
/// Returns `None` when that day lies before the earliest representable date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use resgrid::calendar::{WeekStart, week_start};
///
/// let saturday = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
/// assert_eq!(
///     week_start(saturday, WeekStart::Monday),
///     NaiveDate::from_ymd_opt(2025, 3, 24)
/// );
/// assert_eq!(
///     week_start(saturday, WeekStart::Sunday),
///     NaiveDate::from_ymd_opt(2025, 3, 23)
/// );
/// ```
pub fn week_start(date: NaiveDate, start: WeekStart) -> Option<NaiveDate> {
    let offset = match start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date.checked_sub_days(Days::new(u64::from(offset)))
}

/// Seven consecutive days starting at a week start.
///
/// Every day of a window is a representable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::InvalidArgument`] if the week reaches past
    /// either end of the supported date range.
    pub fn containing(date: NaiveDate, start: WeekStart) -> Result<Self, ResgridError> {
        week_start(date, start)
            .and_then(Self::starting_at)
            .ok_or_else(|| {
                ResgridError::InvalidArgument(format!(
                    "the week containing {date} is outside the supported date range"
                ))
            })
    }

    fn starting_at(start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_days(Days::new(6))?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window, inclusive.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        let mut days = self.start.iter_days();
        std::array::from_fn(|_| days.next().unwrap_or(self.end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The week before, if it is representable.
    pub fn previous(&self) -> Option<Self> {
        Self::starting_at(self.start.checked_sub_days(Days::new(7))?)
    }

    /// The week after, if it is representable.
    pub fn next(&self) -> Option<Self> {
        Self::starting_at(self.end.checked_add_days(Days::new(1))?)
    }
}

/// One event block on a day grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "Id: Serialize, P: Serialize"))]
pub struct PlacedEvent<'a, Id, P> {
    event: &'a Event<Id, P>,
    slot: LayoutSlot,
    placement: Placement,
    column: ColumnBox,
}

impl<'a, Id, P> PlacedEvent<'a, Id, P> {
    pub fn event(&self) -> &'a Event<Id, P> {
        self.event
    }

    pub fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Horizontal extent inside the day column.
    pub fn column(&self) -> &ColumnBox {
        &self.column
    }
}

/// Layout of a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "Id: Serialize, P: Serialize"))]
pub struct DayLayout<'a, Id, P> {
    date: NaiveDate,
    group_count: usize,
    events: Vec<PlacedEvent<'a, Id, P>>,
}

impl<'a, Id, P> DayLayout<'a, Id, P> {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Number of column groups used on this day.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Placed events, group by group.
    pub fn events(&self) -> &[PlacedEvent<'a, Id, P>] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn find(&self, id: &Id) -> Option<&PlacedEvent<'a, Id, P>>
    where
        Id: PartialEq,
    {
        self.events.iter().find(|placed| placed.event.id() == id)
    }
}

/// Layout of the seven days of a [`WeekWindow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "Id: Serialize, P: Serialize"))]
pub struct WeekLayout<'a, Id, P> {
    window: WeekWindow,
    days: Vec<DayLayout<'a, Id, P>>,
}

impl<'a, Id, P> WeekLayout<'a, Id, P> {
    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    /// Day layouts, first day of the week first.
    pub fn days(&self) -> &[DayLayout<'a, Id, P>] {
        &self.days
    }

    /// Total number of events placed across the week.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|day| day.events.len()).sum()
    }
}

/// Builder for laying out reservation calendars.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use resgrid::{CalendarBuilder, config::AppConfig};
/// use resgrid_core::{event::Event, time::TimeSpan};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
/// let span = |sh, eh| {
///     TimeSpan::new(
///         day.and_hms_opt(sh, 0, 0).unwrap(),
///         day.and_hms_opt(eh, 0, 0).unwrap(),
///     )
/// };
/// let events = vec![Event::bare(1, span(18, 20)), Event::bare(2, span(19, 21))];
///
/// let builder = CalendarBuilder::new(AppConfig::default()).unwrap();
/// let layout = builder.layout_day(day, &events);
///
/// assert_eq!(layout.group_count(), 2);
/// assert_eq!(layout.find(&1).unwrap().placement().top(), 12.0 * 80.0);
/// ```
pub struct CalendarBuilder {
    config: AppConfig,
    engine: Box<dyn ColumnEngine>,
}

impl Default for CalendarBuilder {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            engine: EngineBuilder::new().build(),
        }
    }
}

impl CalendarBuilder {
    /// Create a calendar builder for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::Config`] if the configuration is invalid.
    pub fn new(config: AppConfig) -> Result<Self, ResgridError> {
        config.validate()?;
        let engine = EngineBuilder::new()
            .with_engine(config.layout().engine())
            .build();
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The week containing `date`, using the configured week start.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::InvalidArgument`] for dates whose week is not
    /// representable.
    pub fn week_of(&self, date: NaiveDate) -> Result<WeekWindow, ResgridError> {
        WeekWindow::containing(date, self.config.calendar().week_start())
    }

    /// Lay out the events that fall on `date`.
    ///
    /// Events on other days are skipped, so callers may pass a whole week or
    /// an unpartitioned list.
    pub fn layout_day<'a, Id, P>(
        &self,
        date: NaiveDate,
        events: &'a [Event<Id, P>],
    ) -> DayLayout<'a, Id, P>
    where
        Id: Clone + Eq + Hash,
    {
        let on_day: Vec<&'a Event<Id, P>> =
            events.iter().filter(|event| event.date() == date).collect();
        let skipped = events.len() - on_day.len();
        if skipped > 0 {
            debug!(date:% = date, skipped = skipped; "Skipped events from other days");
        }

        let spans: Vec<_> = on_day.iter().map(|event| *event.span()).collect();
        let (slots, group_count) = assign_slots(self.engine.as_ref(), &spans);

        let grid = self.config.grid();
        let events = slots
            .into_iter()
            .map(|(index, slot)| {
                let event = on_day[index];
                PlacedEvent {
                    event,
                    slot,
                    placement: positioning::vertical_placement(event.span(), grid),
                    column: positioning::horizontal_placement(
                        &slot,
                        grid.column_width(),
                        grid.column_gutter(),
                    ),
                }
            })
            .collect();

        DayLayout {
            date,
            group_count,
            events,
        }
    }

    /// Lay out every day of `window`.
    pub fn layout_week<'a, Id, P>(
        &self,
        window: WeekWindow,
        events: &'a [Event<Id, P>],
    ) -> WeekLayout<'a, Id, P>
    where
        Id: Clone + Eq + Hash,
    {
        let days: Vec<_> = window
            .days()
            .into_iter()
            .map(|date| self.layout_day(date, events))
            .collect();

        info!(
            week_start:% = window.start(),
            events = days.iter().map(|day| day.events.len()).sum::<usize>();
            "Week laid out"
        );

        WeekLayout { window, days }
    }
}
