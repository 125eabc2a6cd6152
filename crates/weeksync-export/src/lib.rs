//! Export reconciliation engine.
//!
//! Makes the remote calendar's weeksync-tagged state for one week match the
//! input slot map exactly, via an explicit two-phase sequence:
//!
//! 1. find and delete the events a previous export created for the week,
//! 2. create a fresh event for every slot in the plan.
//!
//! Delete-then-recreate substitutes for a diff/patch protocol the remote API
//! does not offer: no duplicate or stale events accumulate across repeated
//! exports, at the cost of event ids changing on every run. Individual slot
//! failures are tolerated; the run carries on and reports them in the
//! outcome.

pub mod reconciler;

pub use reconciler::WeekExporter;
