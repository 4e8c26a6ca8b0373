//! Sorter and presenter. Orders grouped entries oldest-first and marks the
//! legacy → modern separator.

use crate::types::{GroupedEntry, Origin, Timeline, TimelineRow};

/// Stable ascending sort by `sort_key`; ties keep their input order.
pub fn sort_entries(mut entries: Vec<GroupedEntry>) -> Vec<GroupedEntry> {
    entries.sort_by_key(|e| e.sort_key);
    entries
}

/// Sort `entries` and flag the first legacy → modern transition.
///
/// At most one row carries `separator_before`; none does when every entry
/// shares one origin.
pub fn present(entries: Vec<GroupedEntry>) -> Timeline {
    let sorted = sort_entries(entries);
    let mut separator_placed = false;
    let mut prev: Option<Origin> = None;

    let rows = sorted
        .into_iter()
        .map(|entry| {
            let separator_before = !separator_placed
                && prev == Some(Origin::Legacy)
                && entry.origin == Origin::Modern;
            separator_placed |= separator_before;
            prev = Some(entry.origin);
            TimelineRow { separator_before, entry }
        })
        .collect();

    Timeline::new(rows)
}
