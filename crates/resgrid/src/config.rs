//! Configuration types for resgrid calendar layout.
//!
//! This module provides configuration structures that control how reservation
//! calendars are laid out. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Selects the [`LayoutEngine`] used to group events.
//! - [`GridConfig`] - Time grid geometry: visible hours, pixel scale, floors.
//! - [`CalendarConfig`] - Calendar conventions such as the first day of the week.
//!
//! # Example
//!
//! ```
//! # use resgrid::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.grid().validate().is_ok());
//! assert_eq!(config.grid().day_start_hour(), 6);
//! ```

use serde::Deserialize;

use crate::{calendar::WeekStart, error::ResgridError, layout::LayoutEngine};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Time grid configuration section.
    #[serde(default)]
    grid: GridConfig,

    /// Calendar configuration section.
    #[serde(default)]
    calendar: CalendarConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, grid: GridConfig, calendar: CalendarConfig) -> Self {
        Self {
            layout,
            grid,
            calendar,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the calendar configuration.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Returns a copy with the layout engine replaced.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.layout.engine = engine;
        self
    }

    /// Checks every section for values the layout cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), ResgridError> {
        self.grid.validate()
    }
}

/// Layout engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    /// [`LayoutEngine`] used to group overlapping events.
    #[serde(default)]
    engine: LayoutEngine,
}

impl LayoutConfig {
    pub fn new(engine: LayoutEngine) -> Self {
        Self { engine }
    }

    /// Returns the configured [`LayoutEngine`].
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }
}

/// Geometry of the day time grid.
///
/// Hours are local wall-clock hours. The grid shows one row per hour from
/// `day_start_hour` through `day_end_hour` inclusive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    day_start_hour: u32,
    day_end_hour: u32,
    pixels_per_hour: f32,
    /// Floor for rendered block height so short reservations stay readable.
    min_visible_height: f32,
    /// Pixel width of one day column.
    column_width: f32,
    /// Horizontal inset on each side of a day column.
    column_gutter: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 22,
            pixels_per_hour: 80.0,
            min_visible_height: 30.0,
            column_width: 160.0,
            column_gutter: 4.0,
        }
    }
}

impl GridConfig {
    /// Creates a grid with the given hour range and scale, default floor and gutter.
    pub fn new(day_start_hour: u32, day_end_hour: u32, pixels_per_hour: f32) -> Self {
        Self {
            day_start_hour,
            day_end_hour,
            pixels_per_hour,
            ..Self::default()
        }
    }

    /// Set the minimum rendered height of an event block
    pub fn with_min_visible_height(mut self, height: f32) -> Self {
        self.min_visible_height = height;
        self
    }

    /// Set the pixel width of a day column
    pub fn with_column_width(mut self, width: f32) -> Self {
        self.column_width = width;
        self
    }

    /// Set the horizontal inset of a day column
    pub fn with_column_gutter(mut self, gutter: f32) -> Self {
        self.column_gutter = gutter;
        self
    }

    pub fn day_start_hour(&self) -> u32 {
        self.day_start_hour
    }

    pub fn day_end_hour(&self) -> u32 {
        self.day_end_hour
    }

    pub fn pixels_per_hour(&self) -> f32 {
        self.pixels_per_hour
    }

    pub fn min_visible_height(&self) -> f32 {
        self.min_visible_height
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn column_gutter(&self) -> f32 {
        self.column_gutter
    }

    /// Total pixel height of the visible grid.
    pub fn grid_height(&self) -> f32 {
        (self.day_end_hour + 1 - self.day_start_hour) as f32 * self.pixels_per_hour
    }

    /// Checks the grid geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ResgridError::Config`] if the hour range is empty or past
    /// midnight, the scale or column width is not positive, or a
    /// floor/gutter is negative.
    pub fn validate(&self) -> Result<(), ResgridError> {
        if self.day_end_hour > 23 {
            return Err(ResgridError::Config(format!(
                "day_end_hour must be at most 23, got {}",
                self.day_end_hour
            )));
        }
        if self.day_end_hour <= self.day_start_hour {
            return Err(ResgridError::Config(format!(
                "day_end_hour ({}) must be after day_start_hour ({})",
                self.day_end_hour, self.day_start_hour
            )));
        }
        if !(self.pixels_per_hour.is_finite() && self.pixels_per_hour > 0.0) {
            return Err(ResgridError::Config(format!(
                "pixels_per_hour must be positive, got {}",
                self.pixels_per_hour
            )));
        }
        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(ResgridError::Config(format!(
                "column_width must be positive, got {}",
                self.column_width
            )));
        }
        if self.min_visible_height.is_nan() || self.min_visible_height < 0.0 {
            return Err(ResgridError::Config(format!(
                "min_visible_height must not be negative, got {}",
                self.min_visible_height
            )));
        }
        if self.column_gutter.is_nan() || self.column_gutter < 0.0 {
            return Err(ResgridError::Config(format!(
                "column_gutter must not be negative, got {}",
                self.column_gutter
            )));
        }
        Ok(())
    }
}

/// Calendar conventions.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CalendarConfig {
    /// First day of the week for week views.
    #[serde(default)]
    week_start: WeekStart,
}

impl CalendarConfig {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_matches_dashboard() {
        let grid = GridConfig::default();
        assert_eq!(grid.day_start_hour(), 6);
        assert_eq!(grid.day_end_hour(), 22);
        assert_eq!(grid.grid_height(), 17.0 * 80.0);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_hour_range() {
        let grid = GridConfig::new(10, 10, 80.0);
        assert!(matches!(grid.validate(), Err(ResgridError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_hours_past_midnight() {
        let grid = GridConfig::new(6, 24, 80.0);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        assert!(GridConfig::new(6, 22, 0.0).validate().is_err());
        assert!(GridConfig::new(6, 22, f32::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_floor() {
        let grid = GridConfig::default().with_min_visible_height(-1.0);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_column_geometry() {
        assert!(GridConfig::default().with_column_width(0.0).validate().is_err());
        assert!(GridConfig::default().with_column_width(f32::INFINITY).validate().is_err());
        assert!(GridConfig::default().with_column_gutter(-4.0).validate().is_err());
        assert!(GridConfig::default().with_column_gutter(f32::NAN).validate().is_err());
        assert!(GridConfig::default().with_min_visible_height(f32::NAN).validate().is_err());
        assert!(GridConfig::default().with_column_width(200.0).validate().is_ok());
    }

    #[test]
    fn test_with_engine() {
        let config = AppConfig::default().with_engine(LayoutEngine::Sweep);
        assert_eq!(config.layout().engine(), LayoutEngine::Sweep);
    }
}
