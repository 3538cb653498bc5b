//! File-backed persistence, end to end through the tracker.

use chrono::NaiveDate;
use nua_core::event::EventForm;
use nua_core::persistence::{FileStore, KeyValueStore, PersistenceGateway, STORAGE_KEY};
use nua_core::session::{ConfigureForm, Tracker};
use nua_core::{CycleLength, CycleProfile, EventKind, EventStore};
use tempfile::TempDir;

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn store_creates_data_dir_on_first_write() {
    let temp = create_temp_dir();
    let dir = temp.path().join("nested/data");
    let mut store = FileStore::new(&dir);

    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    store.set(STORAGE_KEY, "{}").unwrap();

    assert!(dir.join("cycle_data.json").exists());
    assert!(!dir.join("cycle_data.json.tmp").exists());
    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
}

#[test]
fn tracker_survives_reopen() {
    let temp = create_temp_dir();

    let id = {
        let mut tracker = Tracker::open(FileStore::new(temp.path()));
        tracker
            .configure(&ConfigureForm {
                last_period_date: "2024-01-01",
                cycle_length: "28",
            })
            .unwrap();
        tracker
            .add_event(&EventForm {
                kind: "period",
                date: "2024-02-01",
                title: "X",
                description: None,
            })
            .unwrap()
    };

    let tracker = Tracker::open(FileStore::new(temp.path()));
    let session = tracker.session();
    assert_eq!(session.profile.anchor, Some(date(2024, 1, 1)));

    let on_day = session.on_date(date(2024, 2, 1));
    assert_eq!(on_day.len(), 1);
    assert_eq!(on_day[0].id, id);
    assert_eq!(on_day[0].kind, EventKind::Period);
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let temp = create_temp_dir();
    std::fs::write(temp.path().join("cycle_data.json"), "{\"anchorDate\": 12").unwrap();

    let tracker = Tracker::open(FileStore::new(temp.path()));
    assert!(!tracker.session().profile.is_configured());
    assert!(tracker.session().events.is_empty());
}

#[test]
fn gateway_round_trip_on_disk() {
    let temp = create_temp_dir();
    let profile = CycleProfile::new(date(2023, 11, 20), CycleLength::new(33).unwrap());
    let events = EventStore::new();

    let mut gateway = PersistenceGateway::new(FileStore::new(temp.path()));
    gateway.save(&profile, &events).unwrap();

    let (loaded_profile, loaded_events) = gateway.load();
    assert_eq!(loaded_profile, profile);
    assert!(loaded_events.is_empty());
}
