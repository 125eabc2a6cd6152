//! Core types: categories, slots, weekly plans, export outcomes, tracing

pub mod category;
pub mod outcome;
pub mod slot;
pub mod tracing;

pub use category::Category;
pub use outcome::{ExportOutcome, SlotFailure};
pub use slot::{SlotEntry, SlotId, SlotIdError, WeeklyPlan};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
