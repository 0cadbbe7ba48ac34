//! Pick validation rules.
//!
//! # Responsibility
//! - Decide whether raw user input may be committed as a pick.
//! - Classify a candidate number for the live availability hint.
//!
//! # Invariants
//! - Functions here are pure: they read indices and never mutate state.
//! - `can_commit` checks run in a fixed order and the first failure wins:
//!   date, number validity, number reuse, date reuse.

use crate::index::{Indices, NumberIndex};
use crate::model::entry::{parse_iso_date, Entry, MAX_NUMBER, MIN_NUMBER};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returns true iff `value` is a whole number within `MIN_NUMBER..=MAX_NUMBER`.
pub fn is_valid_number(value: f64) -> bool {
    value.is_finite()
        && value.fract() == 0.0
        && value >= f64::from(MIN_NUMBER)
        && value <= f64::from(MAX_NUMBER)
}

/// Parsed form of the number input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Empty,
    Invalid,
    Valid(u16),
}

/// Parses raw number input. Blank is `Empty`.
///
/// Only plain decimal digits are accepted, optionally followed by a zero
/// fraction (`"7.0"`). Signs, exponents, other fractions and values outside
/// `MIN_NUMBER..=MAX_NUMBER` are `Invalid`.
pub fn parse_candidate(raw: &str) -> Candidate {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Candidate::Empty;
    }
    let whole = match trimmed.split_once('.') {
        Some((whole, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        Some(_) => return Candidate::Invalid,
        None => trimmed,
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Candidate::Invalid;
    }
    match whole.parse::<u16>() {
        Ok(value) if (MIN_NUMBER..=MAX_NUMBER).contains(&value) => Candidate::Valid(value),
        _ => Candidate::Invalid,
    }
}

/// Availability of a candidate number, recomputed on every input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStatus {
    Empty,
    Invalid,
    Used { number: u16, date: NaiveDate },
    Available(u16),
}

impl NumberStatus {
    /// User-facing hint; `None` when there is nothing to say.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Invalid => Some(format!(
                "Enter a number between {MIN_NUMBER} and {MAX_NUMBER}."
            )),
            Self::Used { number, date } => Some(format!(
                "#{number} already used on {date}. Pick a different number."
            )),
            Self::Available(number) => Some(format!("#{number} is available.")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Invalid | Self::Used { .. })
    }
}

/// Classifies raw number input against the current number index.
pub fn classify_number(raw: &str, numbers: &NumberIndex) -> NumberStatus {
    match parse_candidate(raw) {
        Candidate::Empty => NumberStatus::Empty,
        Candidate::Invalid => NumberStatus::Invalid,
        Candidate::Valid(number) => match numbers.get(&number) {
            Some(&date) => NumberStatus::Used { number, date },
            None => NumberStatus::Available(number),
        },
    }
}

/// Why a pick cannot be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingDate,
    InvalidDate(String),
    InvalidNumber(String),
    NumberUsed { number: u16, date: NaiveDate },
    DateTaken { date: NaiveDate, number: u16 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDate => write!(f, "Select a date."),
            Self::InvalidDate(raw) => write!(f, "`{raw}` is not a YYYY-MM-DD date."),
            Self::InvalidNumber(_) => write!(
                f,
                "Enter a valid number ({MIN_NUMBER}-{MAX_NUMBER})."
            ),
            Self::NumberUsed { number, date } => write!(f, "#{number} already used on {date}."),
            Self::DateTaken { date, number } => {
                write!(f, "This date ({date}) already has a pick (#{number}).")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks raw `(date, number)` input against fresh indices.
///
/// Returns the entry to commit on success.
pub fn can_commit(date: &str, number: &str, indices: &Indices) -> Result<Entry, ValidationError> {
    let date_text = date.trim();
    if date_text.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    let date = parse_iso_date(date_text)
        .ok_or_else(|| ValidationError::InvalidDate(date_text.to_string()))?;

    let number = match parse_candidate(number) {
        Candidate::Valid(value) => value,
        Candidate::Empty | Candidate::Invalid => {
            return Err(ValidationError::InvalidNumber(number.trim().to_string()));
        }
    };

    if let Some(used_on) = indices.date_for(number) {
        return Err(ValidationError::NumberUsed {
            number,
            date: used_on,
        });
    }
    if let Some(existing) = indices.number_for(date) {
        return Err(ValidationError::DateTaken {
            date,
            number: existing,
        });
    }

    Ok(Entry::new(date, number))
}

#[cfg(test)]
mod tests {
    use super::{
        can_commit, classify_number, is_valid_number, parse_candidate, Candidate, NumberStatus,
        ValidationError,
    };
    use crate::index::Indices;
    use crate::model::entry::{parse_iso_date, seed_entries};

    #[test]
    fn valid_number_boundaries() {
        assert!(is_valid_number(1.0));
        assert!(is_valid_number(365.0));
        assert!(!is_valid_number(0.0));
        assert!(!is_valid_number(366.0));
        assert!(!is_valid_number(1.5));
        assert!(!is_valid_number(f64::NAN));
        assert!(!is_valid_number(f64::INFINITY));
    }

    #[test]
    fn candidate_parsing() {
        assert_eq!(parse_candidate("   "), Candidate::Empty);
        assert_eq!(parse_candidate("abc"), Candidate::Invalid);
        assert_eq!(parse_candidate("1.5"), Candidate::Invalid);
        assert_eq!(parse_candidate("-4"), Candidate::Invalid);
        assert_eq!(parse_candidate(" 42 "), Candidate::Valid(42));
        assert_eq!(parse_candidate("7.0"), Candidate::Valid(7));
        assert_eq!(parse_candidate("365"), Candidate::Valid(365));
        assert_eq!(parse_candidate("0"), Candidate::Invalid);
        assert_eq!(parse_candidate("99999"), Candidate::Invalid);
    }

    #[test]
    fn candidate_rejects_non_integer_spellings() {
        for raw in ["1e2", "+5", "5.", ".5", "0x10", "1_0", "5.01", "inf", "NaN"] {
            assert_eq!(parse_candidate(raw), Candidate::Invalid, "input: {raw}");
        }
    }

    #[test]
    fn classify_against_seed() {
        let indices = Indices::build(&seed_entries());
        assert_eq!(classify_number("", &indices.by_number), NumberStatus::Empty);
        assert_eq!(classify_number("400", &indices.by_number), NumberStatus::Invalid);
        assert_eq!(
            classify_number("213", &indices.by_number),
            NumberStatus::Used {
                number: 213,
                date: parse_iso_date("2025-10-19").unwrap()
            }
        );
        let available = classify_number("1", &indices.by_number);
        assert_eq!(available, NumberStatus::Available(1));
        assert_eq!(available.hint().as_deref(), Some("#1 is available."));
        assert!(!available.is_error());
    }

    #[test]
    fn used_hint_names_the_binding_date() {
        let indices = Indices::build(&seed_entries());
        let hint = classify_number("26", &indices.by_number).hint().unwrap();
        assert_eq!(hint, "#26 already used on 2025-10-22. Pick a different number.");
    }

    #[test]
    fn number_reuse_beats_date_reuse() {
        let indices = Indices::build(&seed_entries());
        let err = can_commit("2025-10-20", "213", &indices).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NumberUsed {
                number: 213,
                date: parse_iso_date("2025-10-19").unwrap()
            }
        );
    }

    #[test]
    fn rejection_order_is_date_then_number_then_reuse() {
        let indices = Indices::build(&seed_entries());
        assert_eq!(
            can_commit("", "abc", &indices).unwrap_err(),
            ValidationError::MissingDate
        );
        assert_eq!(
            can_commit("yesterday", "abc", &indices).unwrap_err(),
            ValidationError::InvalidDate("yesterday".to_string())
        );
        assert_eq!(
            can_commit("2025-10-19", "366", &indices).unwrap_err(),
            ValidationError::InvalidNumber("366".to_string())
        );
        assert_eq!(
            can_commit("2025-10-19", "1", &indices).unwrap_err(),
            ValidationError::DateTaken {
                date: parse_iso_date("2025-10-19").unwrap(),
                number: 213
            }
        );
    }

    #[test]
    fn fresh_pair_is_accepted() {
        let indices = Indices::build(&seed_entries());
        let entry = can_commit("2025-10-26", "1", &indices).unwrap();
        assert_eq!(entry.date_iso(), "2025-10-26");
        assert_eq!(entry.number, 1);
    }
}
