//! Aggregator. Folds normalized rows into one [`GroupedEntry`] per group key.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::grouping::{GroupKey, KeyBuilder};
use crate::types::{GroupedEntry, NormalizedEntry};

/// Fold `entries` by [`GroupKey`].
///
/// The first row seen for a key seeds the grouped entry; later rows only
/// contribute attachments not already present. Groups come back in order of
/// their first row, so equal sort keys stay deterministic downstream.
pub fn aggregate<'e, I>(entries: I, keys: &mut KeyBuilder) -> Vec<GroupedEntry>
where
    I: IntoIterator<Item = &'e NormalizedEntry>,
{
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<GroupedEntry> = Vec::new();

    for entry in entries {
        match index.entry(keys.key_for(entry)) {
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(GroupedEntry::seed(entry));
            }
            Entry::Occupied(slot) => {
                if let Some(name) = entry.attachment.as_deref() {
                    groups[*slot.get()].add_attachment(name);
                }
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupingConfig;
    use crate::types::Origin;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn row(origin: Origin, ms: i64, notes: &str, attachment: Option<&str>) -> NormalizedEntry {
        NormalizedEntry {
            specimen_number: "L-1".into(),
            names: vec![],
            notes: notes.into(),
            author_display_name: "Jane Doe".into(),
            created_at: DateTime::<Utc>::from_timestamp_millis(ms),
            created_date: format!("d{ms}"),
            created_time: format!("t{ms}"),
            last_modified_display: "N/A".into(),
            origin,
            attachment: attachment.map(str::to_string),
            author_id: (origin == Origin::Legacy).then(|| "210".to_string()),
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        let rows: Vec<NormalizedEntry> = Vec::new();
        let mut keys = KeyBuilder::new(&GroupingConfig::default());
        assert!(aggregate(&rows, &mut keys).is_empty());
    }

    #[test]
    fn first_seen_fields_win() {
        let rows = vec![
            row(Origin::Modern, 5_000, "check sample", Some("x.pdf")),
            row(Origin::Modern, 5_300, "check sample", Some("y.pdf")),
        ];
        let mut keys = KeyBuilder::new(&GroupingConfig::default());
        let groups = aggregate(&rows, &mut keys);

        assert_eq!(groups.len(), 1);
        let entry = &groups[0];
        assert_eq!(entry.created_time, "t5000");
        assert_eq!(entry.sort_key, 5_000);
        assert_eq!(entry.attachments, vec!["x.pdf", "y.pdf"]);
    }

    #[test]
    fn attachment_free_rows_still_merge() {
        let rows = vec![
            row(Origin::Modern, 5_000, "n", None),
            row(Origin::Modern, 5_100, "n", Some("late.pdf")),
            row(Origin::Modern, 5_200, "n", None),
        ];
        let mut keys = KeyBuilder::new(&GroupingConfig::default());
        let groups = aggregate(&rows, &mut keys);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].attachments, vec!["late.pdf"]);
    }

    #[test]
    fn identical_legacy_rows_stay_separate() {
        let rows = vec![
            row(Origin::Legacy, 1_000, "same", None),
            row(Origin::Legacy, 1_000, "same", None),
        ];
        let mut keys = KeyBuilder::new(&GroupingConfig::default());
        assert_eq!(aggregate(&rows, &mut keys).len(), 2);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let rows = vec![
            row(Origin::Legacy, 9_000, "late legacy", None),
            row(Origin::Modern, 1_000, "a", Some("a.pdf")),
            row(Origin::Modern, 3_000, "b", None),
            row(Origin::Modern, 1_200, "a", Some("a2.pdf")),
        ];
        let mut keys = KeyBuilder::new(&GroupingConfig::default());
        let notes: Vec<String> = aggregate(&rows, &mut keys).into_iter().map(|g| g.notes).collect();
        assert_eq!(notes, vec!["late legacy", "a", "b"]);
    }
}
