use std::{fmt, ops::RangeInclusive, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Years offered on either side of the current one when picking a period.
pub const SELECTABLE_YEAR_SPAN: i32 = 5;

/// Reporting granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    #[default]
    Month,
    Year,
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodMode::Month => "month",
            PeriodMode::Year => "year",
        };
        f.write_str(label)
    }
}

impl FromStr for PeriodMode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(PeriodMode::Month),
            "year" => Ok(PeriodMode::Year),
            _ => Err(ValidationError::UnknownPeriodMode(value.trim().to_string())),
        }
    }
}

/// Query parameter choosing the reporting period. `month` is ignored in
/// [`PeriodMode::Year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodSelector {
    mode: PeriodMode,
    year: i32,
    month: u32,
}

impl PeriodSelector {
    pub fn month(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        Ok(Self {
            mode: PeriodMode::Month,
            year,
            month,
        })
    }

    pub fn year(year: i32) -> Self {
        Self {
            mode: PeriodMode::Year,
            year,
            month: 1,
        }
    }

    /// Selector for the period of the given granularity that contains `today`.
    pub fn current(mode: PeriodMode, today: NaiveDate) -> Self {
        Self {
            mode,
            year: today.year(),
            month: today.month(),
        }
    }

    /// Switches granularity, keeping the selected year and month.
    pub fn with_mode(self, mode: PeriodMode) -> Self {
        Self { mode, ..self }
    }

    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    pub fn year_value(&self) -> i32 {
        self.year
    }

    /// Selected month, only meaningful in month mode.
    pub fn month_value(&self) -> Option<u32> {
        match self.mode {
            PeriodMode::Month => Some(self.month),
            PeriodMode::Year => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.mode {
            PeriodMode::Month => date.year() == self.year && date.month() == self.month,
            PeriodMode::Year => date.year() == self.year,
        }
    }

    pub fn selectable_years(today: NaiveDate) -> RangeInclusive<i32> {
        let year = today.year();
        (year - SELECTABLE_YEAR_SPAN)..=(year + SELECTABLE_YEAR_SPAN)
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            PeriodMode::Month => write!(f, "{:04}-{:02}", self.year, self.month),
            PeriodMode::Year => write!(f, "{:04}", self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_selector_matches_year_and_month() {
        let selector = PeriodSelector::month(2024, 1).unwrap();
        assert!(selector.contains(date(2024, 1, 1)));
        assert!(selector.contains(date(2024, 1, 31)));
        assert!(!selector.contains(date(2024, 2, 1)));
        assert!(!selector.contains(date(2023, 1, 15)));
    }

    #[test]
    fn year_selector_ignores_month() {
        let selector = PeriodSelector::year(2024);
        assert!(selector.contains(date(2024, 1, 1)));
        assert!(selector.contains(date(2024, 12, 31)));
        assert!(!selector.contains(date(2025, 1, 1)));
        assert_eq!(selector.month_value(), None);
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert_eq!(
            PeriodSelector::month(2024, 0),
            Err(ValidationError::InvalidMonth(0))
        );
        assert_eq!(
            PeriodSelector::month(2024, 13),
            Err(ValidationError::InvalidMonth(13))
        );
    }

    #[test]
    fn mode_parsing_rejects_unknown_modes() {
        assert_eq!("Month".parse::<PeriodMode>(), Ok(PeriodMode::Month));
        assert_eq!(" year".parse::<PeriodMode>(), Ok(PeriodMode::Year));
        assert_eq!(
            "week".parse::<PeriodMode>(),
            Err(ValidationError::UnknownPeriodMode("week".into()))
        );
    }

    #[test]
    fn current_and_with_mode_keep_the_reference_date() {
        let today = date(2024, 7, 19);
        let monthly = PeriodSelector::current(PeriodMode::Month, today);
        assert_eq!(monthly, PeriodSelector::month(2024, 7).unwrap());
        let yearly = monthly.with_mode(PeriodMode::Year);
        assert_eq!(yearly.year_value(), 2024);
        assert_eq!(yearly.with_mode(PeriodMode::Month).month_value(), Some(7));
    }

    #[test]
    fn selectable_years_span_both_directions() {
        let years = PeriodSelector::selectable_years(date(2024, 3, 1));
        assert_eq!(*years.start(), 2019);
        assert_eq!(*years.end(), 2029);
        assert_eq!(years.count(), 11);
    }

    #[test]
    fn display_uses_iso_like_labels() {
        assert_eq!(PeriodSelector::month(2024, 3).unwrap().to_string(), "2024-03");
        assert_eq!(PeriodSelector::year(2024).to_string(), "2024");
    }
}
