//! Month grid derivation.
//!
//! Weeks start on Sunday: `leading_blanks` is the weekday index of day 1
//! with Sunday = 0.

use crate::index::build_date_index;
use crate::model::entry::Entry;
use chrono::{Datelike, NaiveDate};

/// Pick state of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPick {
    Picked(u16),
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub date: NaiveDate,
    pub pick: DayPick,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
    /// Long form, e.g. "October 2025".
    pub label: String,
    pub leading_blanks: u32,
    pub cells: Vec<CalendarCell>,
}

/// Number of days in zero-based `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)?;
    let days = days_from(first)
        .take_while(|date| date.month() == first.month())
        .count();
    u32::try_from(days).ok()
}

/// Consecutive days from `first`, ending at `NaiveDate::MAX` inclusive.
fn days_from(first: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(first), |date| date.succ_opt())
}

/// Builds the grid for zero-based `month` of `year`.
///
/// Returns `None` when the month is outside 0..=11 or the year cannot be
/// represented.
pub fn derive_calendar(
    year: i32,
    month: u32,
    entries: &[Entry],
    today: NaiveDate,
) -> Option<CalendarGrid> {
    if month > 11 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let days = days_in_month(year, month)?;
    let by_date = build_date_index(entries);

    let cells = days_from(first)
        .take(days as usize)
        .map(|date| CalendarCell {
            day: date.day(),
            date,
            pick: by_date
                .get(&date)
                .map_or(DayPick::Available, |&number| DayPick::Picked(number)),
            is_today: date == today,
        })
        .collect();

    Some(CalendarGrid {
        year,
        month,
        label: first.format("%B %Y").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        cells,
    })
}
