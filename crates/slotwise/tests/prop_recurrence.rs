//! Property-based tests for recurrence planning using proptest.
//!
//! These verify invariants that should hold for *any* valid combination of
//! anchor date, selected weekdays, and target count, not just the worked
//! examples in `recurrence_tests.rs`.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use slotwise::recurrence::{plan, week_start_of};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Anchor dates in the 2025-2027 range. Day capped at 28 to avoid invalid
/// month/day combos.
fn arb_anchor() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// A non-empty weekday selection, drawn from a 7-bit mask.
fn arb_weekdays() -> impl Strategy<Value = HashSet<Weekday>> {
    (1u8..=127).prop_map(|mask| {
        let all = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        all.iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, w)| *w)
            .collect()
    })
}

fn arb_count() -> impl Strategy<Value = u32> {
    1u32..=40
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Exactly target_count occurrences, never PlanningExhausted
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn count_invariant(
        anchor in arb_anchor(),
        weekdays in arb_weekdays(),
        count in arb_count(),
    ) {
        let planned = plan(anchor, &weekdays, count);
        prop_assert!(planned.is_ok(), "valid input must never exhaust: {:?}", planned);
        prop_assert_eq!(planned.unwrap().len() as u32, count);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Strictly chronological output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn strictly_chronological(
        anchor in arb_anchor(),
        weekdays in arb_weekdays(),
        count in arb_count(),
    ) {
        let planned = plan(anchor, &weekdays, count).unwrap();
        for pair in planned.windows(2) {
            prop_assert!(
                pair[0].date < pair[1].date,
                "dates not strictly increasing: {} then {}",
                pair[0].date,
                pair[1].date
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Every occurrence lands on a selected weekday, at/after anchor
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn occurrences_match_selection(
        anchor in arb_anchor(),
        weekdays in arb_weekdays(),
        count in arb_count(),
    ) {
        let planned = plan(anchor, &weekdays, count).unwrap();
        for occ in &planned {
            prop_assert!(weekdays.contains(&occ.weekday));
            prop_assert_eq!(occ.weekday, occ.date.weekday());
            prop_assert!(occ.date >= anchor, "occurrence {} precedes anchor {}", occ.date, anchor);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Sequence numbers are dense and 1-based
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn dense_sequence_numbers(
        anchor in arb_anchor(),
        weekdays in arb_weekdays(),
        count in arb_count(),
    ) {
        let planned = plan(anchor, &weekdays, count).unwrap();
        for (i, occ) in planned.iter().enumerate() {
            prop_assert_eq!(occ.sequence_number, i as u32 + 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: No date is planned twice and consecutive same-weekday
// occurrences are exactly one week apart when only one weekday is selected
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn single_weekday_spacing(
        anchor in arb_anchor(),
        count in 2u32..=20,
        day_index in 0usize..7,
    ) {
        let all = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        let weekdays: HashSet<Weekday> = [all[day_index]].into_iter().collect();

        let planned = plan(anchor, &weekdays, count).unwrap();
        for pair in planned.windows(2) {
            prop_assert_eq!((pair[1].date - pair[0].date).num_days(), 7);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: week_start_of is idempotent and always lands on Monday
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn week_start_is_monday(anchor in arb_anchor()) {
        let start = week_start_of(anchor);
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert_eq!(week_start_of(start), start);
        prop_assert!((anchor - start).num_days() < 7);
        prop_assert!(start <= anchor);
    }
}
