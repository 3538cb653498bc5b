//! Session state: the cycle profile and events a user is working with.

use chrono::NaiveDate;

use crate::cycle::{CycleLength, CycleProfile, parse_date};
use crate::error::{CycleResult, ValidationError};
use crate::estimate::{self, Countdown, CurrentPhase};
use crate::event::{Event, EventForm, NewEvent};
use crate::event_store::EventStore;
use crate::grid::{self, CalendarCell, YearMonth};
use crate::persistence::{KeyValueStore, PersistenceGateway};

/// Raw values of the cycle configuration form.
#[derive(Debug, Clone, Default)]
pub struct ConfigureForm<'a> {
    pub last_period_date: &'a str,
    pub cycle_length: &'a str,
}

impl ConfigureForm<'_> {
    pub fn validate(&self) -> Result<CycleProfile, ValidationError> {
        let anchor = parse_date(self.last_period_date)?;
        let length = CycleLength::parse(self.cycle_length)?;
        Ok(CycleProfile::new(anchor, length))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub profile: CycleProfile,
    pub events: EventStore,
}

impl Session {
    pub fn new(profile: CycleProfile, events: EventStore) -> Self {
        Session { profile, events }
    }

    /// Replace the profile with validated form input. On error the current
    /// profile is kept.
    pub fn configure(&mut self, form: &ConfigureForm) -> Result<(), ValidationError> {
        self.profile = form.validate()?;
        tracing::info!(
            anchor = %self.profile.anchor.map(|d| d.to_string()).unwrap_or_default(),
            length = self.profile.length.days(),
            "cycle configured"
        );
        Ok(())
    }

    pub fn add_event(&mut self, form: &EventForm) -> Result<String, ValidationError> {
        let new = form.validate()?;
        Ok(self.insert_event(new))
    }

    pub fn insert_event(&mut self, new: NewEvent) -> String {
        let id = self.events.add(new);
        tracing::info!(%id, "event added");
        id
    }

    pub fn remove_event(&mut self, id: &str) -> Option<Event> {
        let removed = self.events.remove(id);
        match &removed {
            Some(_) => tracing::info!(%id, "event removed"),
            None => tracing::debug!(%id, "no event to remove"),
        }
        removed
    }

    pub fn current_phase(&self, today: NaiveDate) -> Option<CurrentPhase> {
        estimate::current_phase(&self.profile, today)
    }

    pub fn next_period(&self) -> Option<NaiveDate> {
        estimate::next_period(&self.profile)
    }

    pub fn countdown(&self, today: NaiveDate) -> Option<Countdown> {
        self.next_period().map(|next| estimate::countdown(next, today))
    }

    pub fn progress(&self, today: NaiveDate) -> Option<f64> {
        estimate::progress(&self.profile, today)
    }

    pub fn grid(&self, month: YearMonth, today: NaiveDate) -> Vec<CalendarCell> {
        grid::build_grid(month, &self.profile, &self.events, today)
    }

    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Event> {
        self.events.upcoming(today, limit)
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.on_date(date)
    }
}

/// A session bound to storage: loaded on open, saved after every mutation.
pub struct Tracker<S> {
    session: Session,
    gateway: PersistenceGateway<S>,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn open(store: S) -> Self {
        let gateway = PersistenceGateway::new(store);
        let (profile, events) = gateway.load();

        Tracker {
            session: Session::new(profile, events),
            gateway,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    fn save(&mut self) -> CycleResult<()> {
        self.gateway.save(&self.session.profile, &self.session.events)
    }

    pub fn configure(&mut self, form: &ConfigureForm) -> CycleResult<()> {
        self.session.configure(form)?;
        self.save()
    }

    pub fn add_event(&mut self, form: &EventForm) -> CycleResult<String> {
        let id = self.session.add_event(form)?;
        self.save()?;
        Ok(id)
    }

    /// Returns the removed event; storage is only touched when one was removed.
    pub fn remove_event(&mut self, id: &str) -> CycleResult<Option<Event>> {
        let removed = self.session.remove_event(id);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CycleError;
    use crate::event::EventKind;
    use crate::persistence::{MemoryStore, STORAGE_KEY};
    use crate::phase::PhaseKey;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn configured() -> Session {
        let mut session = Session::default();
        session
            .configure(&ConfigureForm {
                last_period_date: "2024-01-01",
                cycle_length: "28",
            })
            .unwrap();
        session
    }

    #[test]
    fn configure_sets_profile() {
        let session = configured();
        assert_eq!(session.profile.anchor, Some(date(2024, 1, 1)));
        assert_eq!(session.profile.length.days(), 28);
    }

    #[test]
    fn invalid_configure_leaves_profile_unchanged() {
        let mut session = configured();
        let before = session.profile;

        let cases = [
            ("", "28", ValidationError::MissingDate),
            ("2024-02-01", "abc", ValidationError::InvalidCycleLength("abc".into())),
            ("2024-02-01", "20", ValidationError::CycleLengthOutOfRange(20)),
            ("2024-02-01", "36", ValidationError::CycleLengthOutOfRange(36)),
        ];
        for (last_period_date, cycle_length, expected) in cases {
            let form = ConfigureForm {
                last_period_date,
                cycle_length,
            };
            assert_eq!(session.configure(&form), Err(expected));
            assert_eq!(session.profile, before);
        }
    }

    #[test]
    fn derived_reads_for_configured_session() {
        let session = configured();
        let today = date(2024, 1, 28);

        assert_eq!(session.next_period(), Some(date(2024, 1, 29)));
        assert_eq!(session.countdown(today), Some(Countdown::Tomorrow));

        let current = session.current_phase(date(2024, 1, 15)).unwrap();
        assert_eq!(current.phase.map(|m| m.key()), Some(PhaseKey::Ovulation));
    }

    #[test]
    fn derived_reads_for_unconfigured_session() {
        let session = Session::default();
        let today = date(2024, 1, 15);

        assert!(session.current_phase(today).is_none());
        assert!(session.next_period().is_none());
        assert!(session.countdown(today).is_none());
        assert!(session.progress(today).is_none());
        assert_eq!(session.grid(YearMonth::of(today).unwrap(), today).len(), 35);
    }

    #[test]
    fn add_event_rejects_invalid_form() {
        let mut session = configured();
        let form = EventForm {
            kind: "period",
            date: "2024-02-01",
            title: "",
            description: None,
        };
        assert_eq!(session.add_event(&form), Err(ValidationError::MissingTitle));
        assert!(session.events.is_empty());
    }

    #[test]
    fn tracker_saves_after_each_mutation() {
        let mut tracker = Tracker::open(MemoryStore::new());
        tracker
            .configure(&ConfigureForm {
                last_period_date: "2024-01-01",
                cycle_length: "30",
            })
            .unwrap();

        let id = tracker
            .add_event(&EventForm {
                kind: "appointment",
                date: "2024-02-01",
                title: "Checkup",
                description: Some("bring results"),
            })
            .unwrap();

        let reopened = Tracker::open(tracker.store().clone());
        assert_eq!(reopened.session(), tracker.session());
        let event = reopened.session().events.get(&id).unwrap();
        assert_eq!(event.kind, EventKind::Appointment);
        assert_eq!(event.description, "bring results");

        assert!(tracker.remove_event(&id).unwrap().is_some());
        assert!(tracker.remove_event(&id).unwrap().is_none());
        let reopened = Tracker::open(tracker.store().clone());
        assert!(reopened.session().events.is_empty());
    }

    #[test]
    fn tracker_validation_error_does_not_save() {
        let mut tracker = Tracker::open(MemoryStore::new());
        let result = tracker.configure(&ConfigureForm {
            last_period_date: "2024-01-01",
            cycle_length: "40",
        });

        assert!(matches!(result, Err(CycleError::Validation(_))));
        assert!(tracker.store().get(STORAGE_KEY).unwrap().is_none());
    }
}
