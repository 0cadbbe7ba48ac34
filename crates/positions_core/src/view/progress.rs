//! Progress summary shown beside the calendar.

use crate::index::build_number_index;
use crate::model::entry::{Entry, MAX_NUMBER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub picks: usize,
    pub remaining: usize,
    /// Entry with the latest date, not the most recently committed one.
    pub last_pick: Option<Entry>,
    /// All entries ordered by number.
    pub used: Vec<Entry>,
}

pub fn derive_progress(entries: &[Entry]) -> ProgressSummary {
    let picks = build_number_index(entries).len();
    let mut used = entries.to_vec();
    used.sort_by_key(|entry| entry.number);

    ProgressSummary {
        picks,
        remaining: usize::from(MAX_NUMBER).saturating_sub(picks),
        last_pick: entries.iter().max_by_key(|entry| entry.date).copied(),
        used,
    }
}

#[cfg(test)]
mod tests {
    use super::derive_progress;
    use crate::model::entry::{parse_iso_date, seed_entries, Entry};

    #[test]
    fn seed_progress() {
        let mut entries = seed_entries();
        // Committed last but dated earliest.
        entries.push(Entry::new(parse_iso_date("2025-01-05").unwrap(), 1));

        let progress = derive_progress(&entries);
        assert_eq!(progress.picks, 8);
        assert_eq!(progress.remaining, 357);
        assert_eq!(progress.last_pick.map(|e| e.number), Some(222));
        let numbers: Vec<u16> = progress.used.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 26, 112, 188, 189, 213, 222, 333]);
    }

    #[test]
    fn empty_progress() {
        let progress = derive_progress(&[]);
        assert_eq!(progress.picks, 0);
        assert_eq!(progress.remaining, 365);
        assert!(progress.last_pick.is_none());
    }
}
