//! Color handling for calendar blocks
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Status palettes are built from it and the rendering
//! layer receives colors as CSS strings.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#bbf7d0" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use resgrid_core::color::Color;
    ///
    /// let green = Color::new("#bbf7d0").unwrap();
    /// let red = Color::new("red").unwrap();
    /// assert_ne!(green, red);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
