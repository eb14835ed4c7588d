//! Column engine factory module
//!
//! This module provides the [`ColumnEngine`] trait that partitions a day's
//! spans into non-overlapping groups, the [`LayoutEngine`] selector used by
//! configuration, and an [`EngineBuilder`] that turns a selector into a
//! ready-to-use engine.

mod greedy;
mod sweep;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::debug;
use serde::{Deserialize, Serialize};

use resgrid_core::time::TimeSpan;

/// Groups produced by an engine: each inner list holds indices into the
/// input span slice, in placement order.
pub type Groups = Vec<Vec<usize>>;

/// Trait defining the interface for column layout engines
pub trait ColumnEngine: Send + Sync {
    /// Partition `spans` into groups of mutually disjoint spans.
    ///
    /// Every index `0..spans.len()` must appear in exactly one group. Spans
    /// are trusted to satisfy `end > start`; engines do not validate them.
    fn group(&self, spans: &[TimeSpan]) -> Groups;
}

/// Available column engines.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Greedy` - First compatible group in creation order (default)
/// - `Sweep` - Sweep line reusing the group that frees up earliest
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Greedy first-fit engine (default)
    #[default]
    Greedy,
    /// Sweep-line engine, minimal number of groups
    Sweep,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "sweep" => Ok(Self::Sweep),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Greedy => "greedy",
            LayoutEngine::Sweep => "sweep",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Builder for creating layout engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineBuilder {
    engine: LayoutEngine,
}

impl EngineBuilder {
    /// Create a builder for the default engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Select which engine to build
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Build the selected engine
    pub fn build(self) -> Box<dyn ColumnEngine> {
        debug!(engine:% = self.engine; "Building column engine");
        match self.engine {
            LayoutEngine::Greedy => Box::new(greedy::Engine::new()),
            LayoutEngine::Sweep => Box::new(sweep::Engine::new()),
        }
    }
}

/// Indices of `spans` ordered by start, ties kept in input order.
fn start_order(spans: &[TimeSpan]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&index| spans[index].start());
    order
}
