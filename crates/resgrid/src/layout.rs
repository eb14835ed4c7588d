//! Column layout for overlapping calendar events.
//!
//! Events on one calendar day are partitioned into groups whose members never
//! overlap in time. Each group is drawn as a horizontal band split into
//! `group_size` equal slots, so two events in the same group never collide
//! and events in different groups are drawn in different bands.
//!
//! The partitioning policy lives behind [`ColumnEngine`]; [`layout`] uses the
//! default greedy engine.

mod engines;
pub mod positioning;

pub use engines::{ColumnEngine, EngineBuilder, Groups, LayoutEngine};

use std::hash::Hash;

use indexmap::IndexMap;
use log::{trace, warn};
use serde::Serialize;

use resgrid_core::{event::Event, time::TimeSpan};

/// Where one event sits inside its group.
///
/// The renderer derives horizontal width as `1 / group_size` of the day
/// column and the offset as `index_in_group / group_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutSlot {
    group_size: usize,
    index_in_group: usize,
    group: usize,
}

impl LayoutSlot {
    pub fn new(group_size: usize, index_in_group: usize, group: usize) -> Self {
        Self {
            group_size,
            index_in_group,
            group,
        }
    }

    /// Number of events in this event's group.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Zero-based position inside the group.
    pub fn index_in_group(&self) -> usize {
        self.index_in_group
    }

    /// Zero-based group index, in group creation order.
    pub fn group(&self) -> usize {
        self.group
    }

    /// Share of the day column this event spans.
    pub fn width_fraction(&self) -> f32 {
        1.0 / self.group_size as f32
    }

    /// Left offset as a share of the day column.
    pub fn offset_fraction(&self) -> f32 {
        self.index_in_group as f32 / self.group_size as f32
    }
}

/// Slot assignments for one layout pass, keyed by event id.
///
/// Iteration follows placement order: all of group 0, then group 1, and so on.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "Id: Serialize + Hash + Eq"))]
pub struct ColumnLayout<Id> {
    slots: IndexMap<Id, LayoutSlot>,
    group_count: usize,
}

impl<Id: Hash + Eq> PartialEq for ColumnLayout<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.group_count == other.group_count && self.slots == other.slots
    }
}

impl<Id: Hash + Eq> Eq for ColumnLayout<Id> {}

impl<Id> Default for ColumnLayout<Id> {
    fn default() -> Self {
        Self {
            slots: IndexMap::default(),
            group_count: 0,
        }
    }
}

impl<Id: Clone + Eq + Hash> ColumnLayout<Id> {
    /// Run `engine` over `events` and key the resulting slots by event id.
    ///
    /// Ids are expected to be unique. When an id repeats, the first
    /// occurrence in placement order keeps its slot and later ones are
    /// dropped with a warning.
    pub fn calculate<'e, P: 'e>(
        engine: &dyn ColumnEngine,
        events: impl IntoIterator<Item = &'e Event<Id, P>>,
    ) -> Self
    where
        Id: 'e,
    {
        let events: Vec<&Event<Id, P>> = events.into_iter().collect();
        let spans: Vec<TimeSpan> = events.iter().map(|event| *event.span()).collect();
        let (placements, group_count) = assign_slots(engine, &spans);

        let mut slots = IndexMap::with_capacity(placements.len());
        for (index, slot) in placements {
            let id = events[index].id().clone();
            if slots.contains_key(&id) {
                warn!(index = index, group = slot.group(); "Duplicate event id, keeping first slot");
                continue;
            }
            slots.insert(id, slot);
        }

        Self { slots, group_count }
    }
}

impl<Id: Eq + Hash> ColumnLayout<Id> {
    pub fn get(&self, id: &Id) -> Option<&LayoutSlot> {
        self.slots.get(id)
    }

    /// Number of groups the engine opened.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &LayoutSlot)> {
        self.slots.iter()
    }

    /// Member ids of every group, in group order.
    pub fn groups(&self) -> Vec<Vec<&Id>> {
        let mut groups: Vec<Vec<&Id>> = vec![Vec::new(); self.group_count];
        for (id, slot) in &self.slots {
            groups[slot.group()].push(id);
        }
        groups
    }
}

/// Lay out one day's events with the default greedy engine.
///
/// The result is pure: the same input list in the same order always yields
/// the same layout, and an empty list yields an empty layout.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use resgrid::layout;
/// use resgrid_core::{event::Event, time::TimeSpan};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
/// let span = |sh, sm, eh, em| {
///     TimeSpan::new(
///         day.and_hms_opt(sh, sm, 0).unwrap(),
///         day.and_hms_opt(eh, em, 0).unwrap(),
///     )
/// };
///
/// let events = vec![
///     Event::bare("A", span(10, 0, 11, 0)),
///     Event::bare("B", span(10, 30, 11, 30)),
///     Event::bare("C", span(11, 0, 12, 0)),
/// ];
///
/// let result = layout::layout(&events);
/// assert_eq!(result.group_count(), 2);
/// assert_eq!(result.get(&"C").unwrap().index_in_group(), 1);
/// assert_eq!(result.get(&"B").unwrap().group_size(), 1);
/// ```
pub fn layout<Id: Clone + Eq + Hash, P>(events: &[Event<Id, P>]) -> ColumnLayout<Id> {
    let engine = EngineBuilder::new().build();
    ColumnLayout::calculate(engine.as_ref(), events)
}

/// Run `engine` over `spans` and turn its groups into slots.
///
/// Returns `(input index, slot)` pairs in placement order together with the
/// number of groups.
pub(crate) fn assign_slots(
    engine: &dyn ColumnEngine,
    spans: &[TimeSpan],
) -> (Vec<(usize, LayoutSlot)>, usize) {
    let groups = engine.group(spans);
    trace!(events = spans.len(), groups = groups.len(); "Grouped events");

    let placements = groups
        .iter()
        .enumerate()
        .flat_map(|(group, members)| {
            let group_size = members.len();
            members
                .iter()
                .enumerate()
                .map(move |(index_in_group, &index)| {
                    (index, LayoutSlot::new(group_size, index_in_group, group))
                })
        })
        .collect();

    (placements, groups.len())
}


#[cfg(test)]
mod proptest_tests {
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Up to 24 events on one day, 15-minute granularity, ids are input positions.
    fn events_strategy() -> impl Strategy<Value = Vec<Event<usize>>> {
        prop::collection::vec((24u32..88, 1u32..16), 0..24).prop_map(|raw| {
            let midnight = NaiveDate::from_ymd_opt(2025, 3, 29)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            raw.into_iter()
                .enumerate()
                .map(|(id, (start_q, len_q))| {
                    let start = midnight + Duration::minutes(i64::from(start_q) * 15);
                    let end = start + Duration::minutes(i64::from(len_q) * 15);
                    Event::bare(id, TimeSpan::new(start, end))
                })
                .collect()
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Two events in the same group never overlap.
    fn check_groups_are_disjoint(events: &[Event<usize>]) -> Result<(), TestCaseError> {
        let result = layout(events);
        for a in events {
            for b in events {
                if a.id() == b.id() {
                    continue;
                }
                let (sa, sb) = (result.get(a.id()).unwrap(), result.get(b.id()).unwrap());
                if sa.group() == sb.group() {
                    prop_assert!(
                        !a.overlaps(b),
                        "{} and {} share group {}",
                        a.span(),
                        b.span(),
                        sa.group()
                    );
                }
            }
        }
        Ok(())
    }

    /// Every event gets exactly one slot, with consistent sizes and bounded indices.
    fn check_slots_are_consistent(events: &[Event<usize>]) -> Result<(), TestCaseError> {
        let result = layout(events);
        prop_assert_eq!(result.len(), events.len());

        for event in events {
            let slot = result.get(event.id()).unwrap();
            let members = result
                .iter()
                .filter(|(_, other)| other.group() == slot.group())
                .count();
            prop_assert_eq!(slot.group_size(), members);
            prop_assert!(slot.index_in_group() < slot.group_size());
            prop_assert!(slot.group() < result.group_count());
        }
        Ok(())
    }

    /// Same input, same output; pre-sorting by start does not change grouping.
    fn check_layout_is_deterministic(events: &[Event<usize>]) -> Result<(), TestCaseError> {
        let first = layout(events);
        let second = layout(events);
        prop_assert_eq!(&first, &second);

        let mut sorted = events.to_vec();
        sorted.sort_by_key(|event| event.start());
        let presorted = layout(&sorted);
        for event in events {
            prop_assert_eq!(first.get(event.id()), presorted.get(event.id()));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn groups_are_disjoint(events in events_strategy()) {
            check_groups_are_disjoint(&events)?;
        }

        #[test]
        fn slots_are_consistent(events in events_strategy()) {
            check_slots_are_consistent(&events)?;
        }

        #[test]
        fn layout_is_deterministic(events in events_strategy()) {
            check_layout_is_deterministic(&events)?;
        }
    }
}
