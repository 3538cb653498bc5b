//! User-entered events (period logs, appointments, medication).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cycle::parse_date;
use crate::error::ValidationError;

/// Dot color for event types without a dedicated color.
pub const DEFAULT_ACCENT: &str = "#C42063";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Period,
    Appointment,
    Medication,
    /// A type string read from storage that we don't recognize, kept verbatim
    Other(String),
}

impl EventKind {
    pub fn dot_color(&self) -> &'static str {
        match self {
            EventKind::Period => "#8B1538",
            EventKind::Appointment => "#3D8DE9",
            EventKind::Medication => "#FFD200",
            EventKind::Other(_) => DEFAULT_ACCENT,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Period => "period",
            EventKind::Appointment => "appointment",
            EventKind::Medication => "medication",
            EventKind::Other(raw) => raw,
        }
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "period" => EventKind::Period,
            "appointment" => EventKind::Appointment,
            "medication" => EventKind::Medication,
            _ => EventKind::Other(raw),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    /// Only the three user-selectable types parse; `Other` is storage-only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "period" => Ok(EventKind::Period),
            "appointment" => Ok(EventKind::Appointment),
            "medication" => Ok(EventKind::Medication),
            _ => Err(ValidationError::UnknownEventType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored event. Events are created and deleted, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A validated event that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub kind: EventKind,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
}

impl NewEvent {
    pub fn new(kind: EventKind, date: NaiveDate, title: impl Into<String>) -> Self {
        NewEvent {
            kind,
            date,
            title: title.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            kind: self.kind,
            date: self.date,
            title: self.title,
            description: self.description,
        }
    }
}

/// Raw values of the event form, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct EventForm<'a> {
    pub kind: &'a str,
    pub date: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
}

impl EventForm<'_> {
    pub fn validate(&self) -> Result<NewEvent, ValidationError> {
        let kind: EventKind = self.kind.parse()?;
        let date = parse_date(self.date)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        Ok(NewEvent::new(kind, date, title)
            .with_description(self.description.unwrap_or_default().trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form<'a>(kind: &'a str, date: &'a str, title: &'a str) -> EventForm<'a> {
        EventForm {
            kind,
            date,
            title,
            description: None,
        }
    }

    #[test]
    fn parse_event_kind() {
        assert_eq!("period".parse::<EventKind>(), Ok(EventKind::Period));
        assert_eq!("Appointment".parse::<EventKind>(), Ok(EventKind::Appointment));
        assert_eq!(
            "unknown".parse::<EventKind>(),
            Err(ValidationError::UnknownEventType("unknown".to_string()))
        );
    }

    #[test]
    fn unknown_kind_falls_back_to_accent() {
        assert_eq!(EventKind::Other("yoga".into()).dot_color(), DEFAULT_ACCENT);
        assert_eq!(EventKind::Period.dot_color(), "#8B1538");
    }

    #[test]
    fn form_defaults_description_to_empty() {
        let new = form("medication", "2024-02-01", "Iron").validate().unwrap();
        assert_eq!(new.kind, EventKind::Medication);
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(new.title, "Iron");
        assert_eq!(new.description, "");
    }

    #[test]
    fn form_requires_title_and_date() {
        assert_eq!(
            form("period", "2024-02-01", "   ").validate(),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            form("period", "", "X").validate(),
            Err(ValidationError::MissingDate)
        );
        assert!(form("surgery", "2024-02-01", "X").validate().is_err());
    }

    #[test]
    fn deserialize_stored_event() {
        let json = r#"{"id":"1706745600000","type":"period","date":"2024-02-01","title":"X"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::Period);
        assert_eq!(event.description, "");

        let json = r#"{"id":"1","type":"yoga","date":"2024-02-01","title":"Y","description":""}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::Other("yoga".to_string()));
        assert_eq!(event.kind.to_string(), "yoga");
    }

    #[test]
    fn unrecognized_type_is_written_back_verbatim() {
        let json = r#"{"id":"1","type":"Yoga Class","date":"2024-02-01","title":"Y"}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "Yoga Class");

        let reread: Event = serde_json::from_value(value).unwrap();
        assert_eq!(reread, event);
    }

    #[test]
    fn serialize_uses_type_field() {
        let event = NewEvent::new(
            EventKind::Appointment,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            "Checkup",
        )
        .into_event("abc".to_string());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "appointment");
        assert_eq!(value["date"], "2024-03-05");
        assert_eq!(value["description"], "");
    }
}
