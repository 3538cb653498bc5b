//! In-memory collection of events, kept in insertion order.

use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

use crate::event::{Event, NewEvent};

/// Default number of events returned by [`EventStore::upcoming`].
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted events. Later duplicates of an id are dropped.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut seen = HashSet::new();
        let events = events
            .into_iter()
            .filter(|e| {
                let fresh = seen.insert(e.id.clone());
                if !fresh {
                    tracing::warn!(id = %e.id, "dropping event with duplicate id");
                }
                fresh
            })
            .collect();

        EventStore { events }
    }

    /// Insert an event under a freshly generated id and return that id.
    ///
    /// Ids are time-ordered UUIDv7 strings, unique among stored events.
    pub fn add(&mut self, new: NewEvent) -> String {
        let mut id = Uuid::now_v7().to_string();
        while self.get(&id).is_some() {
            id = Uuid::now_v7().to_string();
        }

        self.events.push(new.into_event(id.clone()));
        id
    }

    /// Remove an event by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Events dated today or later, earliest first, at most `limit` of them.
    /// Events sharing a date keep their insertion order.
    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Event> {
        let mut upcoming: Vec<&Event> = self.events.iter().filter(|e| e.date >= today).collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming.truncate(limit);
        upcoming
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_event(kind: EventKind, date: NaiveDate, title: &str) -> NewEvent {
        NewEvent::new(kind, date, title)
    }

    #[test]
    fn add_then_lookup_then_remove() {
        let mut store = EventStore::new();
        let feb1 = date(2024, 2, 1);

        let id = store.add(new_event(EventKind::Period, feb1, "X"));

        let found = store.on_date(feb1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert_eq!(found[0].title, "X");

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.on_date(feb1).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = EventStore::new();
        store.add(new_event(EventKind::Medication, date(2024, 2, 1), "Iron"));

        assert!(store.remove("does-not-exist").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let mut store = EventStore::new();
        let ids: HashSet<String> = (0..200)
            .map(|i| store.add(new_event(EventKind::Appointment, date(2024, 2, 1), &i.to_string())))
            .collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn on_date_ignores_other_days() {
        let mut store = EventStore::new();
        store.add(new_event(EventKind::Period, date(2024, 2, 1), "a"));
        store.add(new_event(EventKind::Medication, date(2024, 2, 2), "b"));
        store.add(new_event(EventKind::Appointment, date(2024, 2, 1), "c"));

        let titles: Vec<_> = store
            .on_date(date(2024, 2, 1))
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn upcoming_skips_past_and_sorts() {
        let mut store = EventStore::new();
        store.add(new_event(EventKind::Period, date(2024, 3, 10), "later"));
        store.add(new_event(EventKind::Period, date(2024, 2, 28), "past"));
        store.add(new_event(EventKind::Period, date(2024, 3, 1), "today"));
        store.add(new_event(EventKind::Period, date(2024, 3, 2), "soon"));

        let titles: Vec<_> = store
            .upcoming(date(2024, 3, 1), DEFAULT_UPCOMING_LIMIT)
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["today", "soon", "later"]);
    }

    #[test]
    fn upcoming_truncates_to_limit() {
        let mut store = EventStore::new();
        for d in 1..=9 {
            store.add(new_event(EventKind::Medication, date(2024, 3, d), "pill"));
        }
        let upcoming = store.upcoming(date(2024, 3, 1), DEFAULT_UPCOMING_LIMIT);
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[4].date, date(2024, 3, 5));
    }

    #[test]
    fn from_events_drops_duplicate_ids() {
        let event = |id: &str, title: &str| Event {
            id: id.to_string(),
            kind: EventKind::Period,
            date: date(2024, 2, 1),
            title: title.to_string(),
            description: String::new(),
        };

        let store = EventStore::from_events(vec![
            event("1", "first"),
            event("1", "second"),
            event("2", "other"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("1").unwrap().title, "first");
    }

    proptest! {
        #[test]
        fn upcoming_is_bounded_and_ordered(
            offsets in prop::collection::vec(-60i64..60, 0..40),
            limit in 0usize..10,
        ) {
            let today = date(2024, 6, 1);
            let mut store = EventStore::new();
            for offset in &offsets {
                store.add(new_event(EventKind::Appointment, today + Duration::days(*offset), "e"));
            }

            let upcoming = store.upcoming(today, limit);
            prop_assert!(upcoming.len() <= limit);
            prop_assert!(upcoming.iter().all(|e| e.date >= today));
            prop_assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }
}
