//! Saving and restoring the cycle profile and events.
//!
//! Everything is stored as one JSON blob under a single key of a
//! [`KeyValueStore`]. Loading never fails: a missing or unparsable blob
//! yields defaults, and an unreadable field or event is dropped with a
//! warning while the rest of the blob is kept.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::cycle::{CycleLength, CycleProfile};
use crate::error::{CycleError, CycleResult};
use crate::event::Event;
use crate::event_store::EventStore;

/// Key the blob is stored under.
pub const STORAGE_KEY: &str = "cycle_data";

/// Minimal string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CycleResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> CycleResult<()>;
}

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CycleResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> CycleResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CycleResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CycleResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-disk layout of the blob.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredData {
    anchor_date: Option<String>,
    cycle_length: u32,
    events: Vec<Event>,
}

/// The blob as read back, each field left loose so it can be checked alone.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadedData {
    #[serde(default)]
    anchor_date: Value,
    #[serde(default)]
    cycle_length: Value,
    #[serde(default)]
    events: Value,
}

/// Anchor dates are written as midnight UTC date-times.
fn format_anchor(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Accepts any RFC 3339 date-time (its UTC date) or a bare `YYYY-MM-DD`.
fn parse_anchor(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// A part of the stored blob that could not be used.
#[derive(Debug)]
enum Corruption {
    AnchorDate(String),
    CycleLength(String),
    EventList(String),
    Event { index: usize, error: serde_json::Error },
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Corruption::AnchorDate(s) => write!(f, "unreadable anchor date {s}"),
            Corruption::CycleLength(s) => write!(f, "cycle length {s} out of range"),
            Corruption::EventList(s) => write!(f, "events is not a list: {s}"),
            Corruption::Event { index, error } => write!(f, "event #{index}: {error}"),
        }
    }
}

fn report(corruption: Corruption) {
    tracing::warn!(%corruption, "dropping unreadable part of stored cycle data");
}

fn anchor_from(value: Value) -> Result<Option<NaiveDate>, Corruption> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => parse_anchor(&s)
            .map(Some)
            .ok_or_else(|| Corruption::AnchorDate(format!("'{s}'"))),
        other => Err(Corruption::AnchorDate(other.to_string())),
    }
}

fn length_from(value: Value) -> Result<CycleLength, Corruption> {
    if value.is_null() {
        return Ok(CycleLength::DEFAULT);
    }
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(|n| CycleLength::new(n).ok())
        .ok_or_else(|| Corruption::CycleLength(value.to_string()))
}

fn events_from(value: Value) -> Vec<Event> {
    let items = match value {
        Value::Null => return Vec::new(),
        Value::Array(items) => items,
        other => {
            report(Corruption::EventList(other.to_string()));
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Event>(item) {
            Ok(event) => Some(event),
            Err(error) => {
                report(Corruption::Event { index, error });
                None
            }
        })
        .collect()
}

impl StoredData {
    fn from_state(profile: &CycleProfile, events: &EventStore) -> Self {
        StoredData {
            anchor_date: profile.anchor.map(format_anchor),
            cycle_length: profile.length.days(),
            events: events.iter().cloned().collect(),
        }
    }
}

impl LoadedData {
    fn into_state(self) -> (CycleProfile, EventStore) {
        let anchor = anchor_from(self.anchor_date).unwrap_or_else(|c| {
            report(c);
            None
        });
        let length = length_from(self.cycle_length).unwrap_or_else(|c| {
            report(c);
            CycleLength::DEFAULT
        });

        (
            CycleProfile { anchor, length },
            EventStore::from_events(events_from(self.events)),
        )
    }
}

pub struct PersistenceGateway<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        PersistenceGateway { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self, profile: &CycleProfile, events: &EventStore) -> CycleResult<()> {
        let data = StoredData::from_state(profile, events);
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| CycleError::Serialization(e.to_string()))?;

        self.store.set(STORAGE_KEY, &json)?;
        tracing::debug!(events = events.len(), "saved cycle data");
        Ok(())
    }

    /// Restore saved state, falling back to an unconfigured profile and no
    /// events when nothing usable is stored.
    pub fn load(&self) -> (CycleProfile, EventStore) {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Default::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read cycle data, starting fresh");
                return Default::default();
            }
        };

        match serde_json::from_str::<LoadedData>(&raw) {
            Ok(data) => {
                let (profile, events) = data.into_state();
                tracing::debug!(events = events.len(), "loaded cycle data");
                (profile, events)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored cycle data is not valid JSON, starting fresh");
                Default::default()
            }
        }
    }
}
