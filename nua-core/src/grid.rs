//! Month grid layout with phase and event annotations.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::cycle::CycleProfile;
use crate::error::ValidationError;
use crate::event_store::EventStore;
use crate::phase::{PhaseKey, classify};

const DAYS_PER_WEEK: usize = 7;

/// Most padding days a grid row can need on either side of its month.
const MAX_PADDING_DAYS: u64 = DAYS_PER_WEEK as u64 - 1;

/// A calendar month whose full Sunday-first grid, padding included, lies
/// within the supported date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
    next_first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = first.checked_add_months(Months::new(1))?;

        first.checked_sub_days(Days::new(MAX_PADDING_DAYS))?;
        next_first.checked_add_days(Days::new(MAX_PADDING_DAYS))?;

        Some(YearMonth { first, next_first })
    }

    /// The month containing `date`, if its grid fits the supported range.
    pub fn of(date: NaiveDate) -> Option<Self> {
        YearMonth::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Shift by a number of months (negative goes back).
    ///
    /// Returns `None` when the result falls outside the supported range.
    pub fn offset(&self, months: i32) -> Option<Self> {
        let index = self
            .first
            .year()
            .checked_mul(12)?
            .checked_add(self.first.month0() as i32)?
            .checked_add(months)?;

        YearMonth::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
    }

    pub fn days_in_month(&self) -> u32 {
        (self.next_first - self.first).num_days() as u32
    }

    /// Weekday of the 1st, counting Sunday as 0.
    pub fn first_weekday(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Human-readable title, e.g. "January 2024".
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date < self.next_first
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidMonth(trimmed.to_string());

        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.first.year(), self.first.month())
    }
}

/// Phase annotation of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPhase {
    pub key: PhaseKey,
    pub sub_stage: &'static str,
}

/// One square of the month grid. Recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: u32,
    /// False for the padding days of the neighbouring months
    pub in_month: bool,
    pub phase: Option<CellPhase>,
    pub is_today: bool,
    /// Dot color of the first event on this day
    pub event_dot: Option<&'static str>,
}

impl CalendarCell {
    fn padding(date: NaiveDate) -> Self {
        CalendarCell {
            date,
            day: date.day(),
            in_month: false,
            phase: None,
            is_today: false,
            event_dot: None,
        }
    }
}

/// Lay out `month` as whole weeks starting on Sunday.
///
/// Leading and trailing cells belong to the neighbouring months and carry no
/// annotations. Days of the month are annotated with their phase and first
/// event only when the profile is configured.
pub fn build_grid(
    month: YearMonth,
    profile: &CycleProfile,
    events: &EventStore,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let first = month.first_day();
    let lead = month.first_weekday() as usize;
    let days = month.days_in_month() as usize;
    let total = (lead + days).div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

    // YearMonth keeps MAX_PADDING_DAYS of room on either side of the month
    let start = first - Days::new(lead as u64);

    start
        .iter_days()
        .take(total)
        .map(|date| {
            if !month.contains(date) {
                return CalendarCell::padding(date);
            }

            let mut cell = CalendarCell {
                date,
                day: date.day(),
                in_month: true,
                phase: None,
                is_today: date == today,
                event_dot: None,
            };

            if profile.is_configured() {
                cell.phase = profile
                    .cycle_day_of(date)
                    .and_then(classify)
                    .map(|m| CellPhase {
                        key: m.key(),
                        sub_stage: m.sub_stage,
                    });
                cell.event_dot = events.on_date(date).first().map(|e| e.kind.dot_color());
            }

            cell
        })
        .collect()
}
