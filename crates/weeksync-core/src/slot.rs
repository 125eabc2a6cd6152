//! Slot identifiers, slot entries, and the weekly plan document.
//!
//! A weekly plan is a map from slot identifiers to slot entries. A slot
//! identifier encodes the week it belongs to (the Monday date), a zero-based
//! day offset within the week, and a zero-based hour of day, in the textual
//! form `YYYY-MM-DD-dayIndex-hour`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// Minimum number of hyphen-delimited segments in a slot id.
///
/// Three for the ISO week date, one for the day index, one for the hour.
const MIN_SEGMENTS: usize = 5;

/// Error produced when a slot identifier fails to parse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotIdError {
    /// The id has fewer than five hyphen-delimited segments.
    #[error("slot id {0:?} has fewer than 5 segments")]
    TooFewSegments(String),

    /// The first three segments do not form a valid ISO date.
    #[error("slot id {id:?} has an invalid week date {date:?}")]
    InvalidDate {
        /// The full slot id.
        id: String,
        /// The date portion that failed to parse.
        date: String,
    },

    /// The day-index or hour segment is not a small non-negative integer.
    #[error("slot id {id:?} has a non-numeric segment {segment:?}")]
    InvalidNumber {
        /// The full slot id.
        id: String,
        /// The offending segment.
        segment: String,
    },
}

/// A parsed slot identifier.
///
/// Parsing is pure: no range clamping is applied to the day index or hour
/// beyond requiring them to be small non-negative integers, so the parsed
/// fields always reproduce exactly what the id encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    /// The week this slot belongs to, identified by its Monday date.
    pub week: NaiveDate,
    /// Zero-based day offset within the week (0 = Monday).
    pub day_index: u8,
    /// Zero-based hour of day.
    pub hour: u8,
}

impl SlotId {
    /// Parses a slot identifier of the form `YYYY-MM-DD-dayIndex-hour`.
    ///
    /// Segments beyond the fifth are ignored. Fewer than five segments, a
    /// malformed date, or non-numeric day/hour segments yield a
    /// [`SlotIdError`].
    pub fn parse(id: &str) -> Result<Self, SlotIdError> {
        let parts: Vec<&str> = id.split('-').collect();
        if parts.len() < MIN_SEGMENTS {
            return Err(SlotIdError::TooFewSegments(id.to_string()));
        }

        let date = parts[..3].join("-");
        let week = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
            SlotIdError::InvalidDate {
                id: id.to_string(),
                date,
            }
        })?;

        let day_index = parts[3].parse::<u8>().map_err(|_| SlotIdError::InvalidNumber {
            id: id.to_string(),
            segment: parts[3].to_string(),
        })?;
        let hour = parts[4].parse::<u8>().map_err(|_| SlotIdError::InvalidNumber {
            id: id.to_string(),
            segment: parts[4].to_string(),
        })?;

        Ok(Self {
            week,
            day_index,
            hour,
        })
    }

    /// Returns the calendar date this slot falls on within the given week.
    ///
    /// The slot's own week date is ignored here; the caller supplies the week
    /// start so that every slot in one export lands in the same week.
    pub fn date_in_week(&self, week_start: NaiveDate) -> NaiveDate {
        week_start + Days::new(u64::from(self.day_index))
    }
}

impl FromStr for SlotId {
    type Err = SlotIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.week.format("%Y-%m-%d"),
            self.day_index,
            self.hour
        )
    }
}

/// An entry assigned to a slot in a weekly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    /// Identifier of the task or entry this slot was filled from.
    pub source_id: String,
    /// Display label shown in the exported event summary.
    pub label: String,
    /// The schedule category driving prefix and color.
    pub category: Category,
    /// The parent objective this slot works toward, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_id: Option<String>,
}

impl SlotEntry {
    /// Creates a new slot entry with no parent objective.
    pub fn new(
        source_id: impl Into<String>,
        label: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            label: label.into(),
            category,
            objective_id: None,
        }
    }

    /// Builder method to set the parent objective.
    pub fn with_objective(mut self, objective_id: impl Into<String>) -> Self {
        self.objective_id = Some(objective_id.into());
        self
    }
}

/// A stored weekly plan document.
///
/// Owned by the persistence collaborator; the export engine only reads the
/// week start and the slot map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    /// The Monday this plan covers.
    #[serde(rename = "weekStartISO")]
    pub week_start: NaiveDate,
    /// Slot id to entry, ordered by slot id.
    pub slots: BTreeMap<String, SlotEntry>,
    /// Free-form notes attached to the week.
    #[serde(default)]
    pub insights: String,
    /// Last modification time of the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
