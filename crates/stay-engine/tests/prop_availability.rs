//! Property-based tests for the availability predicates using proptest.
//!
//! These check invariants that must hold for *any* reservation snapshot, not
//! just the hand-picked cases in `availability_tests.rs`.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use stay_engine::availability::{
    blocked_runs, day_status, is_day_blocked, is_day_selectable, DayStatus, ProposedRange,
};
use stay_engine::conflict::find_conflicts;
use stay_engine::reservation::{Reservation, ReservationStatus};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// A day within 90 days of the base date.
fn arb_day() -> impl Strategy<Value = NaiveDate> {
    (0i64..90).prop_map(|offset| base() + Duration::days(offset))
}

fn arb_status() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Confirmed),
        Just(ReservationStatus::Cancelled),
    ]
}

/// A reservation of 1-14 days starting somewhere in the 90-day span.
fn arb_reservation() -> impl Strategy<Value = Reservation> {
    (0i64..90, 0i64..14, arb_status()).prop_map(|(start, len, status)| {
        let start_date = base() + Duration::days(start);
        Reservation::new(
            format!("r{}-{}", start, len),
            "room-1",
            start_date,
            start_date + Duration::days(len),
            status,
        )
    })
}

fn arb_reservations() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec(arb_reservation(), 0..8)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Cancelled reservations never block any day, whatever else is in the snapshot.
    #[test]
    fn cancelled_only_snapshot_blocks_nothing(
        res in arb_reservations(),
        day in arb_day(),
    ) {
        let cancelled: Vec<Reservation> = res
            .into_iter()
            .map(|mut r| { r.status = ReservationStatus::Cancelled; r })
            .collect();
        prop_assert!(!is_day_blocked(day, &cancelled));
    }

    /// Adding cancelled reservations never changes which days are blocked.
    #[test]
    fn cancelled_reservations_are_transparent(
        active in arb_reservations(),
        extra in arb_reservations(),
        day in arb_day(),
    ) {
        let mut combined = active.clone();
        combined.extend(extra.into_iter().map(|mut r| { r.status = ReservationStatus::Cancelled; r }));
        prop_assert_eq!(is_day_blocked(day, &active), is_day_blocked(day, &combined));
    }

    /// Days before today are never selectable.
    #[test]
    fn past_days_never_selectable(
        res in arb_reservations(),
        today in arb_day(),
        back in 1i64..60,
        start in proptest::option::of(arb_day()),
    ) {
        let day = today - Duration::days(back);
        prop_assert!(!is_day_selectable(day, &res, start, today));
    }

    /// Selectable is exactly "status is Available".
    #[test]
    fn selectable_agrees_with_status(
        res in arb_reservations(),
        day in arb_day(),
        today in arb_day(),
        start in proptest::option::of(arb_day()),
    ) {
        prop_assert_eq!(
            is_day_selectable(day, &res, start, today),
            day_status(day, &res, start, today) == DayStatus::Available
        );
    }

    /// A selectable end day after the start means the whole range is conflict-free.
    #[test]
    fn selectable_end_means_no_conflicts(
        res in arb_reservations(),
        start in arb_day(),
        len in 1i64..30,
    ) {
        let end = start + Duration::days(len);
        if is_day_selectable(end, &res, Some(start), base()) {
            let range = ProposedRange::new(start, end).unwrap();
            prop_assert!(find_conflicts(&range, &res).is_empty());
        }
    }

    /// Blocked runs are sorted, disjoint, non-adjacent, inside the window, and
    /// cover exactly the blocked days.
    #[test]
    fn blocked_runs_cover_blocked_days(res in arb_reservations()) {
        let window_start = base() + Duration::days(10);
        let window_end = base() + Duration::days(60);
        let runs = blocked_runs(&res, window_start, window_end);

        for pair in runs.windows(2) {
            prop_assert!((pair[1].first - pair[0].last).num_days() > 1);
        }
        for run in &runs {
            prop_assert!(run.first >= window_start && run.last <= window_end);
            prop_assert_eq!(run.days, (run.last - run.first).num_days() + 1);
        }

        let mut d = window_start;
        while d <= window_end {
            let in_run = runs.iter().any(|r| r.first <= d && d <= r.last);
            prop_assert_eq!(in_run, is_day_blocked(d, &res), "day {}", d);
            d += Duration::days(1);
        }
    }
}
