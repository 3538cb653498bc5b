//! Next-period projection, countdown and cycle progress.

use chrono::{Duration, NaiveDate};

use crate::cycle::{CycleLength, CycleProfile};
use crate::phase::{PhaseMatch, classify};

/// Projected start of the next cycle: anchor + cycle length.
pub fn next_period(profile: &CycleProfile) -> Option<NaiveDate> {
    let anchor = profile.anchor?;
    Some(anchor + Duration::days(i64::from(profile.length.days())))
}

/// How far away the next period is, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Expected date is today or already past, by this many days
    Overdue(u32),
    Tomorrow,
    InDays(u32),
}

pub fn countdown(next: NaiveDate, today: NaiveDate) -> Countdown {
    let days_until = (next - today).num_days();
    match days_until {
        d if d <= 0 => Countdown::Overdue(d.unsigned_abs() as u32),
        1 => Countdown::Tomorrow,
        d => Countdown::InDays(d as u32),
    }
}

/// Share of the current cycle elapsed as of `today`, in percent.
pub fn progress(profile: &CycleProfile, today: NaiveDate) -> Option<f64> {
    let day = profile.cycle_day_of(today)?;
    let percent = f64::from(day) / f64::from(profile.length.days()) * 100.0;
    Some(percent.clamp(0.0, 100.0))
}

/// Everything a phase card shows: "Day X of Y" and the phase, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentPhase {
    pub cycle_day: u32,
    pub cycle_length: CycleLength,
    /// `None` when the cycle day is past the last phase range
    pub phase: Option<PhaseMatch>,
}

pub fn current_phase(profile: &CycleProfile, today: NaiveDate) -> Option<CurrentPhase> {
    let cycle_day = profile.cycle_day_of(today)?;
    Some(CurrentPhase {
        cycle_day,
        cycle_length: profile.length,
        phase: classify(cycle_day),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::PhaseKey;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(length: u32) -> CycleProfile {
        CycleProfile::new(date(2024, 1, 1), CycleLength::new(length).unwrap())
    }

    #[test]
    fn next_period_adds_cycle_length() {
        assert_eq!(next_period(&profile(28)), Some(date(2024, 1, 29)));
        assert_eq!(next_period(&profile(35)), Some(date(2024, 2, 5)));
        assert_eq!(next_period(&CycleProfile::default()), None);
    }

    #[test]
    fn countdown_day_before_is_tomorrow() {
        let next = next_period(&profile(28)).unwrap();
        assert_eq!(countdown(next, date(2024, 1, 28)), Countdown::Tomorrow);
    }

    #[test]
    fn countdown_in_days() {
        let next = date(2024, 1, 29);
        assert_eq!(countdown(next, date(2024, 1, 15)), Countdown::InDays(14));
        assert_eq!(countdown(next, date(2024, 1, 27)), Countdown::InDays(2));
    }

    #[test]
    fn countdown_same_day_and_past_are_overdue() {
        let next = date(2024, 1, 29);
        assert_eq!(countdown(next, date(2024, 1, 29)), Countdown::Overdue(0));
        assert_eq!(countdown(next, date(2024, 2, 3)), Countdown::Overdue(5));
    }

    #[test]
    fn progress_tracks_cycle_day() {
        let p = profile(28);
        assert_eq!(progress(&p, date(2024, 1, 14)), Some(50.0));
        assert_eq!(progress(&p, date(2024, 1, 28)), Some(100.0));
        assert_eq!(progress(&CycleProfile::default(), date(2024, 1, 14)), None);
    }

    #[test]
    fn current_phase_mid_cycle_is_ovulation() {
        let current = current_phase(&profile(28), date(2024, 1, 15)).unwrap();
        assert_eq!(current.cycle_day, 15);
        assert_eq!(current.cycle_length.days(), 28);
        assert_eq!(current.phase.map(|m| m.key()), Some(PhaseKey::Ovulation));
    }

    #[test]
    fn current_phase_past_ranges_has_no_phase() {
        let current = current_phase(&profile(35), date(2024, 1, 30)).unwrap();
        assert_eq!(current.cycle_day, 30);
        assert!(current.phase.is_none());
    }

    #[test]
    fn current_phase_unconfigured() {
        assert!(current_phase(&CycleProfile::default(), date(2024, 1, 15)).is_none());
    }
}
