//! Minute-of-day interval arithmetic on a single calendar day.
//!
//! All scheduling math in slotwise happens at minute resolution within one
//! local calendar day, so intervals are half-open `[start, end)` ranges of
//! minutes from local midnight. Crossing midnight is not representable on
//! purpose: a session block lives entirely on one date.

use serde::{Deserialize, Serialize};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A half-open `[start, end)` range of minutes from local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinuteSpan {
    /// Start minute, inclusive.
    pub start: u16,
    /// End minute, exclusive.
    pub end: u16,
}

impl MinuteSpan {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    /// Two spans overlap iff `a.start < b.end && b.start < a.end`.
    /// Adjacent spans (one ends exactly where the other starts) do NOT overlap.
    pub fn overlaps(&self, other: &MinuteSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains(&self, other: &MinuteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The overlapping portion of two spans, if any.
    pub fn intersect(&self, other: &MinuteSpan) -> Option<MinuteSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(MinuteSpan::new(start, end))
        } else {
            None
        }
    }
}

/// Subtract a list of busy spans from `window`, returning the remaining gaps.
///
/// `busy` must be sorted by start minute. Walks the busy list left to right
/// with a cursor starting at `window.start`: each gap before a busy span is
/// emitted, the cursor advances to `max(cursor, busy.end)`, and whatever
/// remains after the last busy span becomes the trailing gap. Busy spans
/// outside the window are ignored; spans straddling its edges are clipped by
/// the cursor arithmetic. With an empty busy list the whole window comes
/// back as a single gap.
///
/// Returned gaps are sorted and pairwise disjoint. Zero-length gaps are
/// never emitted; minimum-duration policy is the caller's concern.
pub fn subtract_sorted(window: MinuteSpan, busy: &[MinuteSpan]) -> Vec<MinuteSpan> {
    let mut gaps = Vec::new();
    let mut cursor = window.start;

    for b in busy {
        if b.start >= window.end {
            break;
        }
        if b.start > cursor {
            gaps.push(MinuteSpan::new(cursor, b.start));
        }
        cursor = cursor.max(b.end);
        if cursor >= window.end {
            return gaps;
        }
    }

    if cursor < window.end {
        gaps.push(MinuteSpan::new(cursor, window.end));
    }

    gaps
}
