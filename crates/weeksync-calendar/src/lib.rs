//! Remote calendar boundary.
//!
//! This crate covers everything that touches the remote calendar:
//!
//! - [`EventPayload`] - The event representation a slot is mapped into
//! - [`CalendarBoundary`] - The trait the export engine reconciles against
//! - [`GoogleCalendarClient`] - The Google Calendar API v3 implementation
//! - [`CalendarError`] - Error taxonomy for boundary operations
//!
//! Events created by weeksync carry private extended properties (the "tag")
//! identifying the week, slot, and category they were generated from, so a
//! later export can find and remove exactly the events it owns without
//! touching the user's unrelated calendar entries.

pub mod boundary;
pub mod client;
pub mod config;
pub mod error;
pub mod event;

pub use boundary::{
    BoxFuture, CalendarBoundary, CreatedEvent, DeleteOutcome, RemoteEvent, MAX_TAGGED_RESULTS,
};
pub use client::GoogleCalendarClient;
pub use config::CalendarConfig;
pub use error::{CalendarError, CalendarErrorCode, CalendarResult};
pub use event::{EventPayload, TAG_CATEGORY, TAG_SLOT_ID, TAG_WEEK};
