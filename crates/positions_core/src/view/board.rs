//! Number board derivation.

use crate::index::build_number_index;
use crate::model::entry::{Entry, MAX_NUMBER, MIN_NUMBER};
use crate::view::state::NumberFilter;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardChip {
    pub number: u16,
    /// Date the number is bound to, when used.
    pub used_on: Option<NaiveDate>,
}

impl BoardChip {
    /// Used chips cannot be clicked to start a new pick.
    pub fn is_disabled(&self) -> bool {
        self.used_on.is_some()
    }

    /// Tooltip text for the chip.
    pub fn title(&self) -> String {
        match self.used_on {
            Some(date) => format!("#{} used on {date}", self.number),
            None => format!("#{} available", self.number),
        }
    }
}

/// Chips for every number in range, in ascending order, kept per `filter`.
pub fn derive_board(entries: &[Entry], filter: NumberFilter) -> Vec<BoardChip> {
    let by_number = build_number_index(entries);
    (MIN_NUMBER..=MAX_NUMBER)
        .map(|number| BoardChip {
            number,
            used_on: by_number.get(&number).copied(),
        })
        .filter(|chip| match filter {
            NumberFilter::All => true,
            NumberFilter::Available => !chip.is_disabled(),
            NumberFilter::Used => chip.is_disabled(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::derive_board;
    use crate::model::entry::seed_entries;
    use crate::view::state::NumberFilter;

    #[test]
    fn used_filter_yields_seed_chips_with_dates() {
        let chips = derive_board(&seed_entries(), NumberFilter::Used);
        assert_eq!(chips.len(), 7);
        assert!(chips.iter().all(|chip| chip.is_disabled()));
        assert_eq!(chips[0].number, 26);
        assert_eq!(chips[0].title(), "#26 used on 2025-10-22");
    }

    #[test]
    fn available_and_all_filters() {
        let seed = seed_entries();
        assert_eq!(derive_board(&seed, NumberFilter::Available).len(), 358);
        let all = derive_board(&seed, NumberFilter::All);
        assert_eq!(all.len(), 365);
        assert_eq!(all.first().map(|chip| chip.number), Some(1));
        assert_eq!(all.last().map(|chip| chip.number), Some(365));
    }
}
