//! Resolve recurring weekly availability against booked time for one week.
//!
//! Projects each weekly rule onto its concrete date in the requested week,
//! subtracts that date's busy intervals, and keeps the gaps that meet the
//! minimum viable slot duration.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::interval::{subtract_sorted, MinuteSpan};

/// Gaps shorter than this are dropped, not clamped.
pub const MIN_SLOT_MINUTES: u16 = 15;

/// A recurring weekly open window owned by the instructor, optionally
/// bounded by a calendar validity range. Read-only to this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailabilityRule {
    pub weekday: Weekday,
    /// Open window, `0 <= start < end <= 1440`.
    pub window: MinuteSpan,
    /// First date (inclusive) on which the rule applies, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    /// Last date (inclusive) on which the rule applies, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,
}

impl WeeklyAvailabilityRule {
    /// Whether the rule's validity range covers the given concrete date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| date >= from)
            && self.valid_to.is_none_or(|to| date <= to)
    }
}

/// A concrete occupied window on one date — an existing booked session or a
/// previously materialized block. `source_id` is opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub date: NaiveDate,
    pub span: MinuteSpan,
    pub source_id: String,
}

/// A contiguous open window on one date, derived on every query.
/// Always at least [`MIN_SLOT_MINUTES`] long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub span: MinuteSpan,
}

/// Resolve free slots for the seven days beginning at `week_start`.
///
/// Each rule active on its projected date is resolved independently against
/// the busy intervals falling on that date; rules are never merged, so
/// overlapping rule windows (a caller error) produce overlapping slots.
/// Busy intervals on other dates are ignored. Returned slots are sorted by
/// date then start minute.
pub fn resolve_week(
    rules: &[WeeklyAvailabilityRule],
    busy: &[BusyInterval],
    week_start: NaiveDate,
) -> Vec<FreeSlot> {
    let mut slots = Vec::new();

    for rule in rules {
        // Concrete date for this rule's weekday within the week.
        let offset = (rule.weekday.num_days_from_monday() + 7
            - week_start.weekday().num_days_from_monday())
            % 7;
        let date = week_start + Duration::days(i64::from(offset));

        if !rule.is_active_on(date) {
            continue;
        }

        let mut day_busy: Vec<MinuteSpan> = busy
            .iter()
            .filter(|b| b.date == date)
            .map(|b| b.span)
            .collect();
        day_busy.sort_by_key(|s| (s.start, s.end));

        for gap in subtract_sorted(rule.window, &day_busy) {
            if gap.duration_minutes() >= MIN_SLOT_MINUTES {
                slots.push(FreeSlot {
                    date,
                    weekday: rule.weekday,
                    span: gap,
                });
            }
        }
    }

    slots.sort_by_key(|s| (s.date, s.span.start, s.span.end));
    slots
}
