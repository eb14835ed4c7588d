//! Sweep-line column engine
//!
//! Events are visited in start order while a min-heap tracks the time at
//! which each group frees up. An event reuses the group that freed earliest
//! if that happened at or before its start, otherwise it opens a new group.
//! The number of groups equals the peak number of simultaneous events.

use std::{cmp::Reverse, collections::BinaryHeap};

use chrono::NaiveDateTime;

use resgrid_core::time::TimeSpan;

use crate::layout::engines::{ColumnEngine, Groups, start_order};

/// Sweep-line engine implementation that implements the ColumnEngine trait
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    /// Create a new sweep-line engine
    pub fn new() -> Self {
        Self
    }
}

impl ColumnEngine for Engine {
    fn group(&self, spans: &[TimeSpan]) -> Groups {
        let mut groups: Groups = Vec::new();
        // (free-at, group index); ties on free-at prefer the older group
        let mut free_at: BinaryHeap<Reverse<(NaiveDateTime, usize)>> = BinaryHeap::new();

        for index in start_order(spans) {
            let span = &spans[index];

            let group = match free_at.peek() {
                Some(Reverse((end, group))) if *end <= span.start() => {
                    let group = *group;
                    free_at.pop();
                    groups[group].push(index);
                    group
                }
                _ => {
                    groups.push(vec![index]);
                    groups.len() - 1
                }
            };

            free_at.push(Reverse((span.end(), group)));
        }

        groups
    }
}
