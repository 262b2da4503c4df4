//! Error types for scheduling operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The student's preference cannot produce a plan — surfaced to the user
    /// as a form validation message, never retried.
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    /// The recurrence planner exceeded its iteration bound. Signals a caller
    /// bug (the bound comfortably covers all valid inputs), not bad input.
    #[error("Recurrence planning exhausted after scanning {scanned_days} days (target {target_count})")]
    PlanningExhausted {
        scanned_days: u32,
        target_count: u32,
    },

    /// An occurrence edit tried to move a block to a different calendar date.
    /// Only the time-of-day and duration may change; prior state is retained.
    #[error("Cannot move occurrence on {planned} to {requested}: edits may not change the date")]
    CrossDayMoveRejected {
        planned: NaiveDate,
        requested: NaiveDate,
    },
}

/// Convenience alias used throughout slotwise.
pub type Result<T> = std::result::Result<T, ScheduleError>;
