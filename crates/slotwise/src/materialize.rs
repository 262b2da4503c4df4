//! Turn planned occurrence dates into concrete proposed session blocks.
//!
//! Each occurrence gets its time-of-day from, in precedence order: a manual
//! override pinned to that exact occurrence, the captured first-week pattern
//! for its weekday (later weeks only), or the student's preference default.
//!
//! The first-week pattern is how a single adjustment in the anchor week
//! propagates forward: materializing an anchor-week occurrence that carries
//! a manual override writes that time back into the pattern map for its
//! weekday, and every later same-weekday occurrence without its own
//! override picks it up.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::interval::{MinuteSpan, MINUTES_PER_DAY};
use crate::recurrence::{week_start_of, PlannedOccurrence};

/// The student's day/time/duration preference for a scheduling attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPreference {
    pub selected_weekdays: HashSet<Weekday>,
    /// Default start time, minutes from local midnight.
    pub preferred_start_minute: u16,
    pub duration_minutes: u16,
}

impl SessionPreference {
    /// Validate the preference as a form input.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidPreference` when no weekday is
    /// selected, the duration is zero, or the default block would cross
    /// midnight.
    pub fn validate(&self) -> Result<()> {
        if self.selected_weekdays.is_empty() {
            return Err(ScheduleError::InvalidPreference(
                "at least one weekday must be selected".to_string(),
            ));
        }
        if self.duration_minutes == 0 {
            return Err(ScheduleError::InvalidPreference(
                "session duration must be positive".to_string(),
            ));
        }
        if u32::from(self.preferred_start_minute) + u32::from(self.duration_minutes)
            > u32::from(MINUTES_PER_DAY)
        {
            return Err(ScheduleError::InvalidPreference(
                "session must end by midnight".to_string(),
            ));
        }
        Ok(())
    }

    /// The default block time derived from this preference.
    pub fn default_span(&self) -> MinuteSpan {
        MinuteSpan::new(
            self.preferred_start_minute,
            self.preferred_start_minute + self.duration_minutes,
        )
    }
}

/// A materialized proposed session block.
///
/// Occurrence identity is the planned `date`: the planner emits at most one
/// occurrence per calendar date, and sequence numbers shift when the target
/// count changes, so edits are keyed by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedBlock {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub sequence_number: u32,
    pub span: MinuteSpan,
    /// Set when a human moved/resized this exact occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<MinuteSpan>,
}

/// Snap a minute value to the nearest multiple of 15.
pub fn snap_to_grid(minute: u16) -> u16 {
    // Widen before adding: `minute + 7` would overflow u16 near its maximum.
    (((u32::from(minute) + 7) / 15) * 15) as u16
}

/// Materialize proposed blocks for the planned occurrences.
///
/// `overrides` maps occurrence dates to human edits; `first_week_pattern`
/// maps weekdays to the time captured from anchor-week edits and is updated
/// in place whenever an override lands on an occurrence whose week is the
/// anchor week (overwriting any prior entry for that weekday). Pattern
/// entries apply only to occurrences outside the anchor week that have no
/// override of their own.
pub fn materialize(
    planned: &[PlannedOccurrence],
    preference: &SessionPreference,
    overrides: &HashMap<NaiveDate, MinuteSpan>,
    first_week_pattern: &mut HashMap<Weekday, MinuteSpan>,
    anchor_week_start: NaiveDate,
) -> Vec<ProposedBlock> {
    planned
        .iter()
        .map(|occ| {
            let in_anchor_week = week_start_of(occ.date) == anchor_week_start;

            let (span, manual_override) = if let Some(&edit) = overrides.get(&occ.date) {
                if in_anchor_week {
                    first_week_pattern.insert(occ.weekday, edit);
                }
                (edit, Some(edit))
            } else if !in_anchor_week {
                match first_week_pattern.get(&occ.weekday) {
                    Some(&pattern) => (pattern, None),
                    None => (preference.default_span(), None),
                }
            } else {
                (preference.default_span(), None)
            };

            ProposedBlock {
                date: occ.date,
                weekday: occ.weekday,
                sequence_number: occ.sequence_number,
                span,
                manual_override,
            }
        })
        .collect()
}
