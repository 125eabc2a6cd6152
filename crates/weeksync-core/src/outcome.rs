//! The result record produced by a week export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The outcome of one export reconciliation run.
///
/// Constructed once per run and immutable thereafter. `success` reflects the
/// run completing, not zero-error completion: individual slots may have been
/// skipped, in which case they are absent from `calendar_event_ids` and
/// listed in `skipped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    /// Whether the run completed.
    pub success: bool,
    /// The Monday of the exported week.
    #[serde(rename = "weekStartISO")]
    pub week_start_iso: String,
    /// Number of events created on the remote calendar.
    pub exported_count: usize,
    /// Number of previously exported events confirmed removed.
    pub overwritten_count: usize,
    /// Slot id to remote event id, for successfully created slots only.
    pub calendar_event_ids: BTreeMap<String, String>,
    /// The target calendar.
    pub calendar_id: String,
    /// Human-readable status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-slot failures that were skipped during the run. Not serialized;
    /// available to callers and tests for diagnostics.
    #[serde(skip)]
    pub skipped: Vec<SlotFailure>,
}

/// One slot that was skipped during an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFailure {
    /// The slot that could not be exported.
    pub slot_id: String,
    /// Why it was skipped.
    pub reason: String,
}

impl SlotFailure {
    /// Creates a new slot failure record.
    pub fn new(slot_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            reason: reason.into(),
        }
    }
}
