//! Lookup projections rebuilt from the entry collection.
//!
//! # Invariants
//! - Indices are never persisted and never patched in place.
//! - When the input violates uniqueness, the first occurrence wins and
//!   later duplicates are counted as anomalies instead of overwriting.

use crate::model::entry::Entry;
use chrono::NaiveDate;
use log::warn;
use std::collections::btree_map::Entry as Slot;
use std::collections::BTreeMap;

pub type NumberIndex = BTreeMap<u16, NaiveDate>;
pub type DateIndex = BTreeMap<NaiveDate, u16>;

/// Both projections of one collection snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indices {
    pub by_number: NumberIndex,
    pub by_date: DateIndex,
    /// Entries skipped because their number or date was already indexed.
    pub anomalies: usize,
}

impl Indices {
    pub fn build(entries: &[Entry]) -> Self {
        let (by_number, number_anomalies) = index_first_wins(entries, |e| (e.number, e.date));
        let (by_date, date_anomalies) = index_first_wins(entries, |e| (e.date, e.number));
        if number_anomalies + date_anomalies > 0 {
            warn!(
                "event=index_build module=index status=anomaly duplicate_numbers={number_anomalies} duplicate_dates={date_anomalies}"
            );
        }
        Self {
            by_number,
            by_date,
            anomalies: number_anomalies + date_anomalies,
        }
    }

    pub fn date_for(&self, number: u16) -> Option<NaiveDate> {
        self.by_number.get(&number).copied()
    }

    pub fn number_for(&self, date: NaiveDate) -> Option<u16> {
        self.by_date.get(&date).copied()
    }

    pub fn used_count(&self) -> usize {
        self.by_number.len()
    }
}

/// number -> date, first occurrence wins.
pub fn build_number_index(entries: &[Entry]) -> NumberIndex {
    Indices::build(entries).by_number
}

/// date -> number, first occurrence wins.
pub fn build_date_index(entries: &[Entry]) -> DateIndex {
    Indices::build(entries).by_date
}

fn index_first_wins<K: Ord, V>(
    entries: &[Entry],
    key_value: impl Fn(&Entry) -> (K, V),
) -> (BTreeMap<K, V>, usize) {
    let mut map = BTreeMap::new();
    let mut skipped = 0;
    for entry in entries {
        let (key, value) = key_value(entry);
        match map.entry(key) {
            Slot::Vacant(slot) => {
                slot.insert(value);
            }
            Slot::Occupied(_) => skipped += 1,
        }
    }
    (map, skipped)
}

#[cfg(test)]
mod tests {
    use super::{build_date_index, build_number_index, Indices};
    use crate::model::entry::{parse_iso_date, seed_entries, Entry};

    #[test]
    fn seed_indices_cover_every_entry() {
        let seed = seed_entries();
        let indices = Indices::build(&seed);
        assert_eq!(indices.used_count(), 7);
        assert_eq!(indices.by_date.len(), 7);
        assert_eq!(indices.anomalies, 0);
        assert_eq!(indices.date_for(213), parse_iso_date("2025-10-19"));
        assert_eq!(indices.number_for(parse_iso_date("2025-10-22").unwrap()), Some(26));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let first = parse_iso_date("2025-01-01").unwrap();
        let second = parse_iso_date("2025-01-02").unwrap();
        let entries = vec![
            Entry::new(first, 5),
            Entry::new(second, 5),
            Entry::new(first, 9),
        ];

        let by_number = build_number_index(&entries);
        assert_eq!(by_number.get(&5), Some(&first));
        assert_eq!(by_number.get(&9), Some(&first));

        let by_date = build_date_index(&entries);
        assert_eq!(by_date.get(&first), Some(&5));
        assert_eq!(by_date.get(&second), Some(&5));

        assert_eq!(Indices::build(&entries).anomalies, 2);
    }
}
