//! Greedy column engine
//!
//! Events are visited in start order and each one joins the first group, in
//! creation order, that it does not overlap. When no group accepts it, a new
//! group is opened at the end.
//!
//! Cost is O(n * g) overlap checks for `n` events and `g` groups, so O(n^2)
//! in the worst case. Per-day reservation counts keep this small.

use resgrid_core::time::TimeSpan;

use crate::layout::engines::{ColumnEngine, Groups, start_order};

/// Greedy first-fit engine implementation that implements the ColumnEngine trait
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    /// Create a new greedy engine
    pub fn new() -> Self {
        Self
    }
}

impl ColumnEngine for Engine {
    fn group(&self, spans: &[TimeSpan]) -> Groups {
        let mut groups: Groups = Vec::new();

        for index in start_order(spans) {
            let span = &spans[index];
            let slot = groups.iter_mut().find(|members| {
                members
                    .iter()
                    .all(|&placed| !span.overlaps(&spans[placed]))
            });

            match slot {
                Some(members) => members.push(index),
                None => groups.push(vec![index]),
            }
        }

        groups
    }
}
