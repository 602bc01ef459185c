//! Tests for conflict detection between a proposed stay and existing reservations.

use chrono::NaiveDate;
use stay_engine::availability::ProposedRange;
use stay_engine::reservation::{Reservation, ReservationStatus};
use stay_engine::{find_conflicts, is_range_bookable};

/// Helper to create a confirmed reservation on room-1.
fn reservation(id: &str, start: &str, end: &str) -> Reservation {
    Reservation::new(
        id,
        "room-1",
        start.parse().unwrap(),
        end.parse().unwrap(),
        ReservationStatus::Confirmed,
    )
}

fn range(from: &str, to: &str) -> ProposedRange {
    ProposedRange::new(from.parse().unwrap(), to.parse().unwrap()).unwrap()
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn overlapping_stay_detected() {
    // Existing 10th-12th, proposed 11th-14th → 2 shared days (11, 12)
    let existing = vec![reservation("a", "2024-06-10", "2024-06-12")];

    let conflicts = find_conflicts(&range("2024-06-11", "2024-06-14"), &existing);

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].overlap_days, 2);
    assert_eq!(conflicts[0].reservation.id, "a");
}

#[test]
fn disjoint_stay_no_conflict() {
    let existing = vec![reservation("a", "2024-06-10", "2024-06-12")];

    let conflicts = find_conflicts(&range("2024-06-13", "2024-06-15"), &existing);

    assert!(conflicts.is_empty(), "disjoint stays should not conflict");
}

#[test]
fn sharing_one_boundary_day_is_a_conflict() {
    // Day ranges are inclusive, so ending on the 10th collides with a start on the 10th.
    let existing = vec![reservation("a", "2024-06-10", "2024-06-12")];

    let conflicts = find_conflicts(&range("2024-06-05", "2024-06-10"), &existing);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_days, 1);
}

#[test]
fn enclosing_stay_counts_whole_reservation() {
    let existing = vec![reservation("a", "2024-06-10", "2024-06-12")];

    let conflicts = find_conflicts(&range("2024-06-01", "2024-06-30"), &existing);

    assert_eq!(conflicts[0].overlap_days, 3);
}

#[test]
fn multiple_reservations_each_reported() {
    let existing = vec![
        reservation("a", "2024-06-10", "2024-06-12"),
        reservation("b", "2024-06-20", "2024-06-22"),
        reservation("c", "2024-07-01", "2024-07-02"),
    ];

    let conflicts = find_conflicts(&range("2024-06-11", "2024-06-21"), &existing);

    let ids: Vec<&str> = conflicts.iter().map(|c| c.reservation.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn cancelled_reservation_never_conflicts() {
    let mut cancelled = reservation("a", "2024-06-10", "2024-06-12");
    cancelled.status = ReservationStatus::Cancelled;

    let conflicts = find_conflicts(&range("2024-06-01", "2024-06-30"), &[cancelled]);

    assert!(conflicts.is_empty());
}

#[test]
fn bookable_requires_future_start_and_no_conflicts() {
    let existing = vec![reservation("a", "2024-06-10", "2024-06-12")];
    let today = day("2024-06-03");

    assert!(is_range_bookable(&range("2024-06-03", "2024-06-09"), &existing, today));
    assert!(!is_range_bookable(&range("2024-06-02", "2024-06-05"), &existing, today));
    assert!(!is_range_bookable(&range("2024-06-05", "2024-06-13"), &existing, today));
}
