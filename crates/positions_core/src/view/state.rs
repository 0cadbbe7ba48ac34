//! Displayed month/year and number-board filter.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Years a calendar can be built for.
pub fn displayable_years() -> RangeInclusive<i32> {
    NaiveDate::MIN.year()..=NaiveDate::MAX.year()
}

/// Which numbers the board shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFilter {
    #[default]
    All,
    Available,
    Used,
}

impl NumberFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Used => "used",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown number filter `{}`; expected all|available|used",
            self.0
        )
    }
}

impl Error for UnknownFilter {}

impl FromStr for NumberFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "used" => Ok(Self::Used),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Process-local view position. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub year: i32,
    pub month: u32,
    pub number_filter: NumberFilter,
}

impl ViewState {
    /// Month containing `today`, filter `All`.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month0(),
            number_filter: NumberFilter::All,
        }
    }

    /// Position at `year`/zero-based `month`, clamped into
    /// [`displayable_years`] and 0..=11.
    pub fn at(year: i32, month: u32, number_filter: NumberFilter) -> Self {
        let years = displayable_years();
        Self {
            year: year.clamp(*years.start(), *years.end()),
            month: month.min(11),
            number_filter,
        }
    }

    /// Advances one month. December of the last displayable year stays put.
    pub fn next_month(&mut self) {
        if self.month < 11 {
            self.month += 1;
            return;
        }
        let years = displayable_years();
        if let Some(year) = self.year.checked_add(1).filter(|year| years.contains(year)) {
            self.year = year;
            self.month = 0;
        }
    }

    /// Steps back one month. January of the first displayable year stays put.
    pub fn prev_month(&mut self) {
        if self.month > 0 {
            self.month = (self.month - 1).min(11);
            return;
        }
        let years = displayable_years();
        if let Some(year) = self.year.checked_sub(1).filter(|year| years.contains(year)) {
            self.year = year;
            self.month = 11;
        }
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.jump_to_date(today);
    }

    pub fn jump_to_date(&mut self, date: NaiveDate) {
        self.year = date.year();
        self.month = date.month0();
    }

    pub fn set_filter(&mut self, filter: NumberFilter) {
        self.number_filter = filter;
    }
}

#[cfg(test)]
mod tests {
    use super::{displayable_years, NumberFilter, ViewState};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn navigation_carries_year_at_boundaries() {
        let mut view = ViewState::starting_at(date(2025, 12, 3));
        assert_eq!((view.year, view.month), (2025, 11));
        view.next_month();
        assert_eq!((view.year, view.month), (2026, 0));
        view.prev_month();
        view.prev_month();
        assert_eq!((view.year, view.month), (2025, 10));

        let mut january = ViewState::starting_at(date(2025, 1, 31));
        january.prev_month();
        assert_eq!((january.year, january.month), (2024, 11));
    }

    #[test]
    fn navigation_stops_at_displayable_year_bounds() {
        let years = displayable_years();

        let mut last = ViewState::at(i32::MAX, 11, NumberFilter::All);
        assert_eq!((last.year, last.month), (*years.end(), 11));
        last.next_month();
        assert_eq!((last.year, last.month), (*years.end(), 11));
        last.prev_month();
        assert_eq!((last.year, last.month), (*years.end(), 10));

        let mut first = ViewState::at(i32::MIN, 0, NumberFilter::Used);
        assert_eq!((first.year, first.month), (*years.start(), 0));
        first.prev_month();
        assert_eq!((first.year, first.month), (*years.start(), 0));
        assert_eq!(first.number_filter, NumberFilter::Used);

        let mut raw = ViewState {
            year: i32::MAX,
            month: 11,
            number_filter: NumberFilter::All,
        };
        raw.next_month();
        assert_eq!(raw.year, i32::MAX);
    }

    #[test]
    fn jumps_keep_filter() {
        let mut view = ViewState::starting_at(date(2025, 10, 26));
        view.set_filter(NumberFilter::Used);
        view.jump_to_date(date(2023, 2, 14));
        assert_eq!((view.year, view.month), (2023, 1));
        view.jump_to_today(date(2025, 10, 26));
        assert_eq!((view.year, view.month), (2025, 9));
        assert_eq!(view.number_filter, NumberFilter::Used);
    }

    #[test]
    fn filter_parses_from_shell_values() {
        assert_eq!("available".parse::<NumberFilter>(), Ok(NumberFilter::Available));
        assert_eq!(" USED ".parse::<NumberFilter>(), Ok(NumberFilter::Used));
        assert!("some".parse::<NumberFilter>().is_err());
        assert_eq!(NumberFilter::default().as_str(), "all");
    }
}
