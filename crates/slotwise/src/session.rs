//! Per-attempt scheduling state and the visible-range query facade.
//!
//! A [`SchedulingSession`] owns the mutable state of one scheduling attempt:
//! the anchor date, the per-occurrence manual overrides, and the captured
//! first-week pattern. That state must survive calendar-range navigation
//! (every [`SchedulingSession::visible_blocks`] call recomputes blocks from
//! scratch) and is discarded only by [`SchedulingSession::reset`].
//!
//! Sessions are never shared: in a multi-request host, keep one per
//! user/attempt.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::availability::{resolve_week, BusyInterval, FreeSlot, WeeklyAvailabilityRule};
use crate::error::{Result, ScheduleError};
use crate::interval::{MinuteSpan, MINUTES_PER_DAY};
use crate::materialize::{materialize, snap_to_grid, ProposedBlock, SessionPreference};
use crate::recurrence::{plan, week_start_of};

/// An inclusive visible date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One renderable block in the visible range, tagged by origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Free(FreeSlot),
    BusyInstructor(BusyInterval),
    BusyOtherParty(BusyInterval),
    Proposed(ProposedBlock),
}

impl Block {
    pub fn date(&self) -> NaiveDate {
        match self {
            Block::Free(slot) => slot.date,
            Block::BusyInstructor(busy) | Block::BusyOtherParty(busy) => busy.date,
            Block::Proposed(block) => block.date,
        }
    }

    pub fn span(&self) -> MinuteSpan {
        match self {
            Block::Free(slot) => slot.span,
            Block::BusyInstructor(busy) | Block::BusyOtherParty(busy) => busy.span,
            Block::Proposed(block) => block.span,
        }
    }
}

/// Everything a visible-range query needs besides session state.
///
/// Both busy sources occupy instructor time and block free-slot generation
/// identically; whether another party's bookings should reduce instructor
/// free time is decided by what the caller puts in `busy_other_party` (pass
/// an empty list to opt out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleBlocksRequest {
    pub range: DateRange,
    pub rules: Vec<WeeklyAvailabilityRule>,
    pub busy_instructor: Vec<BusyInterval>,
    #[serde(default)]
    pub busy_other_party: Vec<BusyInterval>,
    pub preference: SessionPreference,
    /// Total sessions to propose across the whole attempt, not per week.
    pub target_count: u32,
}

/// Mutable state of one scheduling attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingSession {
    anchor: NaiveDate,
    overrides: HashMap<NaiveDate, MinuteSpan>,
    first_week_pattern: HashMap<Weekday, MinuteSpan>,
}

impl SchedulingSession {
    /// Start a scheduling attempt anchored at `anchor`.
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            overrides: HashMap::new(),
            first_week_pattern: HashMap::new(),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// The manual override recorded for an occurrence date, if any.
    pub fn override_for(&self, date: NaiveDate) -> Option<MinuteSpan> {
        self.overrides.get(&date).copied()
    }

    /// The captured first-week pattern entry for a weekday, if any.
    pub fn pattern_for(&self, weekday: Weekday) -> Option<MinuteSpan> {
        self.first_week_pattern.get(&weekday).copied()
    }

    /// Compute the tagged block set for a visible range.
    ///
    /// Free slots are resolved per week against the union of both busy
    /// sources; busy intervals are re-tagged and filtered, never recomputed.
    /// The full recurrence is planned and materialized regardless of the
    /// range — keeping first-week pattern capture consistent while the user
    /// navigates — and only in-range proposed blocks are returned. Output is
    /// grouped by date ascending; callers must not rely on any ordering
    /// within a date.
    ///
    /// An inverted range (`end < start`) yields an empty block set.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidPreference` for an unplannable
    /// preference and `ScheduleError::PlanningExhausted` if the recurrence
    /// scan bound is exceeded.
    pub fn visible_blocks(&mut self, request: &VisibleBlocksRequest) -> Result<Vec<Block>> {
        request.preference.validate()?;

        let planned = plan(
            self.anchor,
            &request.preference.selected_weekdays,
            request.target_count,
        )?;
        let proposed = materialize(
            &planned,
            &request.preference,
            &self.overrides,
            &mut self.first_week_pattern,
            week_start_of(self.anchor),
        );

        let range = request.range;
        if range.end < range.start {
            return Ok(Vec::new());
        }

        let mut blocks = Vec::new();

        // Free slots, week by week, with both busy sources blocking alike.
        let all_busy: Vec<BusyInterval> = request
            .busy_instructor
            .iter()
            .chain(request.busy_other_party.iter())
            .cloned()
            .collect();
        let mut week = week_start_of(range.start);
        while week <= range.end {
            for slot in resolve_week(&request.rules, &all_busy, week) {
                if range.contains(slot.date) {
                    blocks.push(Block::Free(slot));
                }
            }
            week += Duration::days(7);
        }

        // Booked intervals, re-tagged.
        for busy in &request.busy_instructor {
            if range.contains(busy.date) {
                blocks.push(Block::BusyInstructor(busy.clone()));
            }
        }
        for busy in &request.busy_other_party {
            if range.contains(busy.date) {
                blocks.push(Block::BusyOtherParty(busy.clone()));
            }
        }

        for block in proposed {
            if range.contains(block.date) {
                blocks.push(Block::Proposed(block));
            }
        }

        blocks.sort_by_key(Block::date);
        Ok(blocks)
    }

    /// Record a human move/resize of the occurrence planned on
    /// `planned_date`.
    ///
    /// Start and end are snapped to the nearest 15-minute multiple before
    /// recording. The edit lands in the override map; if the occurrence
    /// falls in the anchor week, the next materialization also captures it
    /// as the first-week pattern for its weekday.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::CrossDayMoveRejected` when `requested_date`
    /// differs from `planned_date`, and `ScheduleError::InvalidPreference`
    /// when snapping collapses the block or it would cross midnight. Prior
    /// state is untouched on any error.
    pub fn apply_edit(
        &mut self,
        planned_date: NaiveDate,
        requested_date: NaiveDate,
        start_minute: u16,
        end_minute: u16,
    ) -> Result<()> {
        if requested_date != planned_date {
            return Err(ScheduleError::CrossDayMoveRejected {
                planned: planned_date,
                requested: requested_date,
            });
        }

        if start_minute > MINUTES_PER_DAY || end_minute > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidPreference(
                "edited block must lie within the day".to_string(),
            ));
        }

        let start = snap_to_grid(start_minute);
        let end = snap_to_grid(end_minute);
        if start >= end || end > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidPreference(
                "edited block must keep a positive duration and end by midnight".to_string(),
            ));
        }

        self.overrides.insert(planned_date, MinuteSpan::new(start, end));
        Ok(())
    }

    /// Remove the manual override for one occurrence, if present.
    ///
    /// The first-week pattern is not touched: a pattern already captured
    /// from this occurrence keeps applying to later weeks until
    /// [`SchedulingSession::reset`].
    pub fn clear_edit(&mut self, planned_date: NaiveDate) {
        self.overrides.remove(&planned_date);
    }

    /// Start over: re-anchor and discard all accumulated edits.
    ///
    /// This is the only transition that clears the override and first-week
    /// pattern maps.
    pub fn reset(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
        self.overrides.clear();
        self.first_week_pattern.clear();
    }
}

/// Total proposed minutes in a block set, for the credit gate.
pub fn proposed_minutes(blocks: &[Block]) -> u32 {
    blocks
        .iter()
        .filter_map(|b| match b {
            Block::Proposed(p) => Some(u32::from(p.span.duration_minutes())),
            _ => None,
        })
        .sum()
}
