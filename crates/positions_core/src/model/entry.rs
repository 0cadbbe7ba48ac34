//! Entry (pick) record and collection-level invariants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest number a pick may use.
pub const MIN_NUMBER: u16 = 1;
/// Largest number a pick may use; also the size of the number pool.
pub const MAX_NUMBER: u16 = 365;

/// Wire format for `Entry::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One committed pick: a calendar date bound to a number.
///
/// Serializes as `{ "date": "YYYY-MM-DD", "number": N }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub number: u16,
}

impl Entry {
    pub fn new(date: NaiveDate, number: u16) -> Self {
        Self { date, number }
    }

    /// Date rendered in the persisted `YYYY-MM-DD` form.
    pub fn date_iso(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Insertion-ordered picks; insertion order is pick order.
pub type EntryCollection = Vec<Entry>;

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

const SEED: &[(i32, u32, u32, u16)] = &[
    (2025, 10, 19, 213),
    (2025, 10, 20, 112),
    (2025, 10, 21, 189),
    (2025, 10, 22, 26),
    (2025, 10, 23, 333),
    (2025, 10, 24, 188),
    (2025, 10, 25, 222),
];

/// Fixture installed into an empty or unreadable store.
pub fn seed_entries() -> EntryCollection {
    SEED.iter()
        .filter_map(|&(year, month, day, number)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| Entry::new(date, number))
        })
        .collect()
}

/// Uniqueness violation detected at a store mutation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    DuplicateNumber { number: u16, date: NaiveDate },
    DuplicateDate { date: NaiveDate, number: u16 },
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateNumber { number, date } => {
                write!(f, "number #{number} is already bound to {date}")
            }
            Self::DuplicateDate { date, number } => {
                write!(f, "date {date} already has pick #{number}")
            }
        }
    }
}

impl ConflictError {
    /// Value-free label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateNumber { .. } => "duplicate_number",
            Self::DuplicateDate { .. } => "duplicate_date",
        }
    }
}

impl Error for ConflictError {}

/// Checks both uniqueness invariants over a whole collection.
///
/// Reports the first repeat in collection order, numbers before dates for
/// the same entry.
pub fn check_unique(entries: &[Entry]) -> Result<(), ConflictError> {
    let mut numbers = HashSet::with_capacity(entries.len());
    let mut dates = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !numbers.insert(entry.number) {
            return Err(ConflictError::DuplicateNumber {
                number: entry.number,
                date: entry.date,
            });
        }
        if !dates.insert(entry.date) {
            return Err(ConflictError::DuplicateDate {
                date: entry.date,
                number: entry.number,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_unique, parse_iso_date, seed_entries, ConflictError, Entry};

    #[test]
    fn seed_has_seven_unique_entries_in_pick_order() {
        let seed = seed_entries();
        assert_eq!(seed.len(), 7);
        assert_eq!(seed[0].date_iso(), "2025-10-19");
        assert_eq!(seed[0].number, 213);
        assert_eq!(seed[6].number, 222);
        check_unique(&seed).unwrap();
    }

    #[test]
    fn entry_serializes_with_iso_date() {
        let entry = Entry::new(parse_iso_date("2025-01-02").unwrap(), 5);
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json, serde_json::json!({ "date": "2025-01-02", "number": 5 }));
    }

    #[test]
    fn parse_iso_date_rejects_other_shapes() {
        assert!(parse_iso_date("2025-13-01").is_none());
        assert!(parse_iso_date("10/19/2025").is_none());
        assert!(parse_iso_date("").is_none());
    }

    #[test]
    fn check_unique_reports_repeated_date() {
        let mut entries = seed_entries();
        entries.push(Entry::new(entries[2].date, 1));
        let err = check_unique(&entries).unwrap_err();
        assert_eq!(
            err,
            ConflictError::DuplicateDate {
                date: entries[2].date,
                number: 1
            }
        );
    }
}
