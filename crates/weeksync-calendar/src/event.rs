//! Event payload mapping.
//!
//! This module maps a (slot id, slot entry, week start, timezone) tuple into
//! the event payload sent to the remote calendar. The mapping is a pure
//! function: identical inputs always produce an identical payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use weeksync_core::slot::{SlotEntry, SlotId, SlotIdError};

/// Private extended-property key carrying the week a tagged event belongs to.
pub const TAG_WEEK: &str = "weeksyncWeek";
/// Private extended-property key carrying the originating slot id.
pub const TAG_SLOT_ID: &str = "weeksyncSlotId";
/// Private extended-property key carrying the slot's category.
pub const TAG_CATEGORY: &str = "weeksyncCategory";

/// Attribution footer appended to every exported event description.
const ATTRIBUTION: &str = "Created by weeksync";

/// A start or end time in the remote API's shape: a naive local datetime
/// string plus an IANA timezone name. No timezone math is done locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// Local datetime, `YYYY-MM-DDTHH:MM:SS`.
    pub date_time: String,
    /// IANA timezone name, e.g. `America/Sao_Paulo`.
    pub time_zone: String,
}

/// The private tag attached to every exported event.
///
/// Later runs query on [`TAG_WEEK`] to rediscover and safely delete exactly
/// the events weeksync created for a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateTag {
    /// Week start date, `YYYY-MM-DD`.
    #[serde(rename = "weeksyncWeek")]
    pub week: String,
    /// The slot id this event was generated from.
    #[serde(rename = "weeksyncSlotId")]
    pub slot_id: String,
    /// The slot's category string.
    #[serde(rename = "weeksyncCategory")]
    pub category: String,
}

/// Extended properties wrapper matching the remote API's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    /// Properties visible only to this application.
    pub private: PrivateTag,
}

/// The event payload sent to the remote calendar on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Event title: a bracketed category prefix plus the slot label.
    pub summary: String,
    /// Multi-line description listing category, objective, and attribution.
    pub description: String,
    /// Start of the one-hour event.
    pub start: EventDateTime,
    /// End of the one-hour event.
    pub end: EventDateTime,
    /// Google Calendar color id derived from the category.
    pub color_id: String,
    /// The private tag identifying this event as weeksync-owned.
    pub extended_properties: ExtendedProperties,
}

impl EventPayload {
    /// Builds the event payload for one slot.
    ///
    /// The event date is `week_start` plus the slot's day offset; the event
    /// runs from the slot hour to the slot hour plus one. An hour-23 slot
    /// therefore renders an end time of `24:00:00`, which the remote API
    /// normalizes; it is passed through rather than rolled to the next date.
    ///
    /// # Errors
    ///
    /// Returns [`SlotIdError`] when the slot id is malformed. The caller is
    /// expected to skip that slot and continue.
    pub fn from_slot(
        slot_id: &str,
        entry: &SlotEntry,
        week_start: NaiveDate,
        timezone: &str,
    ) -> Result<Self, SlotIdError> {
        let slot = SlotId::parse(slot_id)?;
        let date = slot.date_in_week(week_start).format("%Y-%m-%d");

        let start = format!("{}T{:02}:00:00", date, slot.hour);
        let end = format!("{}T{:02}:00:00", date, u32::from(slot.hour) + 1);

        let summary = format!("[{}] {}", entry.category.summary_prefix(), entry.label);

        let mut description = format!("Category: {}", entry.category);
        if let Some(objective) = &entry.objective_id {
            description.push_str(&format!("\nObjective: {}", objective));
        }
        description.push_str(&format!("\n\n---\n{}", ATTRIBUTION));

        Ok(Self {
            summary,
            description,
            start: EventDateTime {
                date_time: start,
                time_zone: timezone.to_string(),
            },
            end: EventDateTime {
                date_time: end,
                time_zone: timezone.to_string(),
            },
            color_id: entry.category.color_id().to_string(),
            extended_properties: ExtendedProperties {
                private: PrivateTag {
                    week: week_start.format("%Y-%m-%d").to_string(),
                    slot_id: slot_id.to_string(),
                    category: entry.category.as_str().to_string(),
                },
            },
        })
    }

    /// Returns the slot id recorded in this payload's private tag.
    pub fn slot_id(&self) -> &str {
        &self.extended_properties.private.slot_id
    }
}
