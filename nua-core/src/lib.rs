//! Core types for nua.
//!
//! This crate holds everything the CLI renders:
//! - `cycle` and `phase` for cycle-day arithmetic and phase classification
//! - `estimate` for the next-period countdown and cycle progress
//! - `event_store` and `grid` for user events and the month calendar
//! - `persistence` and `session` for state that survives between runs

pub mod config;
pub mod cycle;
pub mod error;
pub mod estimate;
pub mod event;
pub mod event_store;
pub mod grid;
pub mod persistence;
pub mod phase;
pub mod schedule;
pub mod session;

pub use cycle::{CycleLength, CycleProfile};
pub use error::{CycleError, CycleResult, ValidationError};
pub use event::{Event, EventKind};
pub use event_store::EventStore;
pub use session::{Session, Tracker};
