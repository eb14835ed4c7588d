//! Grid positioning
//!
//! Converts event spans and layout slots into pixel geometry on the day time
//! grid. Vertical placement depends only on the span and the grid; horizontal
//! placement depends only on the slot and the day column width.

use chrono::Timelike;
use serde::Serialize;

use resgrid_core::time::TimeSpan;

use crate::{config::GridConfig, layout::LayoutSlot};

/// Vertical extent of an event block, in pixels from the top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    top: f32,
    height: f32,
    natural_height: f32,
}

impl Placement {
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Rendered height, never below the grid's minimum visible height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Height proportional to the span's duration, before clamping.
    pub fn natural_height(&self) -> f32 {
        self.natural_height
    }

    /// Whether the block had to be stretched to stay readable.
    pub fn is_clamped(&self) -> bool {
        self.height > self.natural_height
    }
}

/// Horizontal extent of an event block inside its day column, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnBox {
    left: f32,
    width: f32,
}

impl ColumnBox {
    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Calculate where a span sits on the grid
///
/// # Arguments
/// * `span` - The event's time span, expected on the grid's day
/// * `grid` - Grid geometry
///
/// # Returns
/// The block's top offset and height. Spans starting before the grid's first
/// hour get a negative top. Clamping to the minimum visible height is purely
/// cosmetic; overlap is always decided on the real span.
pub fn vertical_placement(span: &TimeSpan, grid: &GridConfig) -> Placement {
    let start = span.start();
    let pixels_per_hour = grid.pixels_per_hour();

    let hours_from_top = i64::from(start.hour()) - i64::from(grid.day_start_hour());
    let top = hours_from_top as f32 * pixels_per_hour
        + (start.minute() as f32 / 60.0) * pixels_per_hour;
    let natural_height = (span.duration_minutes() as f32 / 60.0) * pixels_per_hour;

    Placement {
        top,
        height: natural_height.max(grid.min_visible_height()),
        natural_height,
    }
}

/// Calculate where a slot sits inside a day column
///
/// The usable width is the column width minus a gutter on each side, split
/// evenly between the members of the slot's group.
///
/// # Arguments
/// * `slot` - The event's layout slot
/// * `column_width` - Full pixel width of the day column
/// * `gutter` - Inset applied on both sides of the column
pub fn horizontal_placement(slot: &LayoutSlot, column_width: f32, gutter: f32) -> ColumnBox {
    let usable = (column_width - 2.0 * gutter).max(0.0);
    let width = usable / slot.group_size() as f32;

    ColumnBox {
        left: gutter + slot.index_in_group() as f32 * width,
        width,
    }
}

/// Hours shown as rows on the grid, first to last.
pub fn hour_rows(grid: &GridConfig) -> impl Iterator<Item = u32> {
    grid.day_start_hour()..=grid.day_end_hour()
}

/// Format an hour of the day as a 12-hour clock label
///
/// # Examples
///
/// ```
/// use resgrid::layout::positioning::format_hour;
///
/// assert_eq!(format_hour(6), "6 AM");
/// assert_eq!(format_hour(12), "12 PM");
/// assert_eq!(format_hour(15), "3 PM");
/// ```
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h > 12 => format!("{} PM", h - 12),
        h => format!("{h} AM"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use float_cmp::assert_approx_eq;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 29)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_vertical_placement_on_default_grid() {
        let grid = GridConfig::default();
        let placement = vertical_placement(&TimeSpan::new(at(10, 30), at(12, 0)), &grid);

        assert_approx_eq!(f32, placement.top(), 4.5 * 80.0);
        assert_approx_eq!(f32, placement.height(), 1.5 * 80.0);
        assert!(!placement.is_clamped());
    }

    #[test]
    fn test_short_event_is_clamped() {
        let grid = GridConfig::default();
        let placement = vertical_placement(&TimeSpan::new(at(18, 0), at(18, 15)), &grid);

        assert_approx_eq!(f32, placement.natural_height(), 20.0);
        assert_approx_eq!(f32, placement.height(), 30.0);
        assert!(placement.is_clamped());
    }

    #[test]
    fn test_event_before_grid_has_negative_top() {
        let grid = GridConfig::default();
        let placement = vertical_placement(&TimeSpan::new(at(5, 0), at(7, 0)), &grid);

        assert_approx_eq!(f32, placement.top(), -80.0);
    }

    #[test]
    fn test_custom_scale() {
        let grid = GridConfig::new(8, 20, 60.0).with_min_visible_height(40.0);
        let placement = vertical_placement(&TimeSpan::new(at(9, 15), at(9, 45)), &grid);

        assert_approx_eq!(f32, placement.top(), 75.0);
        assert_approx_eq!(f32, placement.height(), 40.0);
    }

    #[test]
    fn test_horizontal_placement_splits_usable_width() {
        let slot = LayoutSlot::new(3, 2, 0);
        let column = horizontal_placement(&slot, 308.0, 4.0);

        assert_approx_eq!(f32, column.width(), 100.0);
        assert_approx_eq!(f32, column.left(), 204.0);
    }

    #[test]
    fn test_horizontal_placement_single_member() {
        let slot = LayoutSlot::new(1, 0, 4);
        let column = horizontal_placement(&slot, 120.0, 4.0);

        assert_approx_eq!(f32, column.left(), 4.0);
        assert_approx_eq!(f32, column.width(), 112.0);
    }

    #[test]
    fn test_hour_rows() {
        let rows: Vec<u32> = hour_rows(&GridConfig::default()).collect();
        assert_eq!(rows.len(), 17);
        assert_eq!(rows.first(), Some(&6));
        assert_eq!(rows.last(), Some(&22));
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(11), "11 AM");
        assert_eq!(format_hour(22), "10 PM");
    }
}
