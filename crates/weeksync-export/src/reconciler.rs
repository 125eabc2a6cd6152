//! The overwrite-synchronization algorithm.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use weeksync_calendar::boundary::{CalendarBoundary, DeleteOutcome};
use weeksync_calendar::config::CalendarConfig;
use weeksync_calendar::error::CalendarResult;
use weeksync_calendar::event::EventPayload;
use weeksync_core::outcome::{ExportOutcome, SlotFailure};
use weeksync_core::slot::SlotEntry;

/// Exports one week of a plan to a remote calendar.
///
/// One exporter handles one target calendar; each [`export_week`] call
/// operates on one user's one week in isolation, issuing remote calls
/// sequentially. Every remote call is its own failure domain: only the
/// initial listing aborts the run, everything after it degrades per item.
///
/// [`export_week`]: WeekExporter::export_week
pub struct WeekExporter<'a> {
    boundary: &'a dyn CalendarBoundary,
    calendar_id: String,
}

impl<'a> WeekExporter<'a> {
    /// Creates an exporter targeting the given calendar.
    pub fn new(boundary: &'a dyn CalendarBoundary, calendar_id: impl Into<String>) -> Self {
        Self {
            boundary,
            calendar_id: calendar_id.into(),
        }
    }

    /// Creates an exporter from a calendar config.
    pub fn from_config(boundary: &'a dyn CalendarBoundary, config: &CalendarConfig) -> Self {
        Self::new(boundary, config.calendar_id.clone())
    }

    /// Replaces the week's previously exported events with fresh ones built
    /// from the slot map.
    ///
    /// The sequence is: list the events tagged for the week, delete them,
    /// then create one event per slot in map order. Per-slot failures
    /// (malformed id, remote creation error) and per-deletion failures are
    /// logged, recorded, and skipped; the run completes and reports
    /// `success = true`. Deleting an id the remote side no longer knows is
    /// treated as already reconciled but is not counted as an overwrite.
    ///
    /// # Errors
    ///
    /// Only a failure of the initial listing aborts the run: without full
    /// visibility of prior state, creating events would risk duplicates.
    pub async fn export_week(
        &self,
        week_start: NaiveDate,
        slots: &BTreeMap<String, SlotEntry>,
        timezone: &str,
    ) -> CalendarResult<ExportOutcome> {
        info!(
            week = %week_start,
            slots = slots.len(),
            calendar = %self.calendar_id,
            "starting calendar export"
        );

        let existing = self
            .boundary
            .list_week_events(&self.calendar_id, week_start)
            .await?;
        debug!("found {} previously exported events", existing.len());

        let mut ledger = ExportLedger::new(week_start, &self.calendar_id);

        for event in &existing {
            match self.boundary.delete_event(&self.calendar_id, &event.id).await {
                Ok(DeleteOutcome::Deleted) => {
                    ledger.record_removed();
                    debug!("deleted event {}", event.id);
                }
                Ok(DeleteOutcome::AlreadyGone) => {
                    debug!("event {} was already gone", event.id);
                }
                Err(e) => {
                    warn!("failed to delete event {}: {}", event.id, e);
                }
            }
        }
        info!("removed {} existing events", ledger.overwritten_count);

        for (slot_id, entry) in slots {
            let payload = match EventPayload::from_slot(slot_id, entry, week_start, timezone) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("skipping slot {}: {}", slot_id, e);
                    ledger.record_skip(slot_id, e.to_string());
                    continue;
                }
            };

            match self.boundary.create_event(&self.calendar_id, &payload).await {
                Ok(created) => {
                    debug!("created event {} for slot {}", created.id, slot_id);
                    ledger.record_created(slot_id, created.id);
                }
                Err(e) => {
                    warn!("failed to create event for slot {}: {}", slot_id, e);
                    ledger.record_skip(slot_id, e.to_string());
                }
            }
        }

        let outcome = ledger.finish();
        info!(
            exported = outcome.exported_count,
            overwritten = outcome.overwritten_count,
            skipped = outcome.skipped.len(),
            "export complete"
        );
        Ok(outcome)
    }
}

/// Fold accumulator for one export run.
///
/// Collects created ids, counts, and skipped slots as the reconciliation
/// iterates, then assembles the immutable [`ExportOutcome`].
struct ExportLedger {
    week_start_iso: String,
    calendar_id: String,
    event_ids: BTreeMap<String, String>,
    overwritten_count: usize,
    skipped: Vec<SlotFailure>,
}

impl ExportLedger {
    fn new(week_start: NaiveDate, calendar_id: &str) -> Self {
        Self {
            week_start_iso: week_start.format("%Y-%m-%d").to_string(),
            calendar_id: calendar_id.to_string(),
            event_ids: BTreeMap::new(),
            overwritten_count: 0,
            skipped: Vec::new(),
        }
    }

    fn record_removed(&mut self) {
        self.overwritten_count += 1;
    }

    fn record_created(&mut self, slot_id: &str, event_id: String) {
        self.event_ids.insert(slot_id.to_string(), event_id);
    }

    fn record_skip(&mut self, slot_id: &str, reason: String) {
        self.skipped.push(SlotFailure::new(slot_id, reason));
    }

    fn finish(self) -> ExportOutcome {
        let exported_count = self.event_ids.len();
        ExportOutcome {
            success: true,
            week_start_iso: self.week_start_iso,
            exported_count,
            overwritten_count: self.overwritten_count,
            calendar_event_ids: self.event_ids,
            calendar_id: self.calendar_id,
            message: Some(format!("Exported {} events to the calendar", exported_count)),
            skipped: self.skipped,
        }
    }
}
