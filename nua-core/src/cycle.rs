//! Cycle profile and cycle-day arithmetic.

use chrono::NaiveDate;
use std::fmt;

use crate::error::ValidationError;

/// Number of days between two successive cycle starts.
/// Always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleLength(u32);

impl CycleLength {
    pub const MIN: u32 = 21;
    pub const MAX: u32 = 35;
    pub const DEFAULT: CycleLength = CycleLength(28);

    pub fn new(days: u32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&days) {
            Ok(CycleLength(days))
        } else {
            Err(ValidationError::CycleLengthOutOfRange(days))
        }
    }

    /// Parse the raw text of a form field ("28", " 30 ").
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let days: u32 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidCycleLength(trimmed.to_string()))?;
        Self::new(days)
    }

    pub fn days(self) -> u32 {
        self.0
    }
}

impl Default for CycleLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CycleLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user's declared cycle: when the most recent one started and how long
/// cycles last. A profile without an anchor is unconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleProfile {
    pub anchor: Option<NaiveDate>,
    pub length: CycleLength,
}

impl CycleProfile {
    pub fn new(anchor: NaiveDate, length: CycleLength) -> Self {
        CycleProfile {
            anchor: Some(anchor),
            length,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.anchor.is_some()
    }

    /// 1-based position of `date` within its cycle, in `1..=length`.
    ///
    /// Dates before the anchor wrap backwards into earlier cycles, so the
    /// result is defined for every date once an anchor is set.
    pub fn cycle_day_of(&self, date: NaiveDate) -> Option<u32> {
        let anchor = self.anchor?;
        let diff = (date - anchor).num_days();
        let day = diff.rem_euclid(i64::from(self.length.days())) + 1;
        Some(day as u32)
    }
}

/// Parse a required `YYYY-MM-DD` form value.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}
