//! The calendar boundary trait.
//!
//! [`CalendarBoundary`] is the seam between the export reconciliation engine
//! and the remote calendar backend. The production implementation is
//! [`GoogleCalendarClient`](crate::client::GoogleCalendarClient); tests
//! reconcile against in-memory fakes.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;

use crate::error::CalendarResult;
use crate::event::EventPayload;

/// Maximum number of tagged events fetched per listing call.
pub const MAX_TAGGED_RESULTS: usize = 200;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the export engine can hold a
/// `&dyn CalendarBoundary`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A previously exported event found on the remote calendar.
///
/// Carries the id needed for deletion plus the tag fields useful for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEvent {
    /// The remote event id.
    pub id: String,
    /// The event summary, if present.
    pub summary: Option<String>,
    /// The originating slot id from the private tag, if present.
    pub slot_id: Option<String>,
    /// The week from the private tag, if present.
    pub week: Option<String>,
}

impl RemoteEvent {
    /// Creates a remote event with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: None,
            slot_id: None,
            week: None,
        }
    }
}

/// A freshly created remote event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    /// The id assigned by the remote calendar.
    pub id: String,
    /// The summary echoed back by the remote calendar.
    pub summary: String,
}

/// The result of a deletion request.
///
/// The remote side reporting an id as already absent is success for
/// reconciliation purposes, but only confirmed deletions are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The event existed and was deleted.
    Deleted,
    /// The remote side reported the event as already absent (404/410).
    AlreadyGone,
}

/// Operations the export engine needs from a remote calendar.
///
/// All three operations assume prior authorization; token acquisition and
/// refresh belong to the authentication collaborator.
pub trait CalendarBoundary: Send + Sync {
    /// Lists the events previously exported for the given week.
    ///
    /// Matches on the private week tag, expands recurring instances into
    /// single occurrences, and caps the result at [`MAX_TAGGED_RESULTS`].
    ///
    /// # Errors
    ///
    /// A listing failure is fatal to the caller's reconciliation run: without
    /// full visibility of prior state the run must not create duplicates.
    fn list_week_events<'a>(
        &'a self,
        calendar_id: &'a str,
        week_start: NaiveDate,
    ) -> BoxFuture<'a, CalendarResult<Vec<RemoteEvent>>>;

    /// Creates an event from the payload.
    fn create_event<'a>(
        &'a self,
        calendar_id: &'a str,
        payload: &'a EventPayload,
    ) -> BoxFuture<'a, CalendarResult<CreatedEvent>>;

    /// Deletes an event by id.
    ///
    /// Not-found on the remote side is reported as
    /// [`DeleteOutcome::AlreadyGone`], not as an error.
    fn delete_event<'a>(
        &'a self,
        calendar_id: &'a str,
        event_id: &'a str,
    ) -> BoxFuture<'a, CalendarResult<DeleteOutcome>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalendarError;
    use weeksync_core::{Category, SlotEntry};

    /// Boundary returning canned data, for driving the trait through a
    /// `&dyn` reference the way the export engine does.
    struct CannedBoundary;

    impl CalendarBoundary for CannedBoundary {
        fn list_week_events<'a>(
            &'a self,
            calendar_id: &'a str,
            week_start: NaiveDate,
        ) -> BoxFuture<'a, CalendarResult<Vec<RemoteEvent>>> {
            Box::pin(async move {
                if calendar_id.is_empty() {
                    return Err(CalendarError::bad_request("empty calendar id"));
                }
                let week = week_start.format("%Y-%m-%d").to_string();
                Ok(vec![RemoteEvent {
                    id: "evt-1".to_string(),
                    summary: Some("seeded".to_string()),
                    slot_id: Some(format!("{}-0-9", week)),
                    week: Some(week),
                }])
            })
        }

        fn create_event<'a>(
            &'a self,
            _calendar_id: &'a str,
            payload: &'a EventPayload,
        ) -> BoxFuture<'a, CalendarResult<CreatedEvent>> {
            Box::pin(async move {
                Ok(CreatedEvent {
                    id: "evt-2".to_string(),
                    summary: payload.summary.clone(),
                })
            })
        }

        fn delete_event<'a>(
            &'a self,
            _calendar_id: &'a str,
            event_id: &'a str,
        ) -> BoxFuture<'a, CalendarResult<DeleteOutcome>> {
            Box::pin(async move {
                if event_id == "gone" {
                    Ok(DeleteOutcome::AlreadyGone)
                } else {
                    Ok(DeleteOutcome::Deleted)
                }
            })
        }
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    #[tokio::test]
    async fn dispatches_through_a_trait_object() {
        let canned = CannedBoundary;
        let boundary: &dyn CalendarBoundary = &canned;

        let events = boundary.list_week_events("primary", week()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "evt-1");
        assert_eq!(events[0].week.as_deref(), Some("2025-01-06"));

        let entry = SlotEntry::new("task-1", "Deep work", Category::Farol1);
        let payload = EventPayload::from_slot("2025-01-06-0-9", &entry, week(), "UTC").unwrap();
        let created = boundary.create_event("primary", &payload).await.unwrap();
        assert_eq!(created.id, "evt-2");
        assert_eq!(created.summary, "[FAROL 1] Deep work");
    }

    #[tokio::test]
    async fn listing_errors_propagate() {
        let canned = CannedBoundary;
        let boundary: &dyn CalendarBoundary = &canned;

        let result = boundary.list_week_events("", week()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn deletion_distinguishes_already_gone() {
        let canned = CannedBoundary;
        let boundary: &dyn CalendarBoundary = &canned;

        assert_eq!(
            boundary.delete_event("primary", "evt-1").await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            boundary.delete_event("primary", "gone").await.unwrap(),
            DeleteOutcome::AlreadyGone
        );
    }
}
