//! Deterministic enumeration of planned session dates.
//!
//! Walks forward from an anchor date one day at a time, emitting every date
//! whose weekday the student selected, until the target session count is
//! reached. The walk is bounded so a logic error can never loop forever.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// One planned date instance of a recurring session proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedOccurrence {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// 1-based, dense, strictly chronological.
    pub sequence_number: u32,
}

/// Most occurrences one scheduling attempt may plan. Far beyond any real
/// student package, and it keeps the scan-bound arithmetic inside `u32`.
pub const MAX_TARGET_COUNT: u32 = 500;

/// The Monday of the calendar week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Plan exactly `target_count` occurrence dates, starting at `anchor`.
///
/// Days are visited in date order beginning at the anchor date itself, so a
/// selected weekday falling earlier in the anchor's week is first planned in
/// the following week. The scan is capped at
/// `(ceil(target_count / |selected_weekdays|) + 2)` weeks; every selected
/// weekday occurs once per scanned week, so the cap is unreachable for valid
/// input and exceeding it reports a planner bug, not bad input.
///
/// # Errors
///
/// Returns `ScheduleError::InvalidPreference` if no weekday is selected or
/// `target_count` is zero or above [`MAX_TARGET_COUNT`], and
/// `ScheduleError::PlanningExhausted` if the scan bound is exceeded.
pub fn plan(
    anchor: NaiveDate,
    selected_weekdays: &HashSet<Weekday>,
    target_count: u32,
) -> Result<Vec<PlannedOccurrence>> {
    if selected_weekdays.is_empty() {
        return Err(ScheduleError::InvalidPreference(
            "at least one weekday must be selected".to_string(),
        ));
    }
    if target_count == 0 {
        return Err(ScheduleError::InvalidPreference(
            "session count must be positive".to_string(),
        ));
    }
    if target_count > MAX_TARGET_COUNT {
        return Err(ScheduleError::InvalidPreference(format!(
            "session count must be at most {}",
            MAX_TARGET_COUNT
        )));
    }

    let weeks_needed = target_count.div_ceil(selected_weekdays.len() as u32);
    let scan_limit_days = (weeks_needed + 2) * 7;

    let mut planned = Vec::with_capacity(target_count as usize);
    let mut date = anchor;
    let mut scanned_days = 0u32;

    while (planned.len() as u32) < target_count {
        if scanned_days >= scan_limit_days {
            return Err(ScheduleError::PlanningExhausted {
                scanned_days,
                target_count,
            });
        }
        if selected_weekdays.contains(&date.weekday()) {
            planned.push(PlannedOccurrence {
                date,
                weekday: date.weekday(),
                sequence_number: planned.len() as u32 + 1,
            });
        }
        date += Duration::days(1);
        scanned_days += 1;
    }

    Ok(planned)
}
