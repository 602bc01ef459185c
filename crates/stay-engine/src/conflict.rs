//! Detect reservations a proposed stay would collide with.
//!
//! Both sides are inclusive day ranges, so two stays conflict as soon as they
//! share a single day. Cancelled reservations never conflict.

use chrono::NaiveDate;

use crate::availability::ProposedRange;
use crate::reservation::Reservation;

/// A reservation overlapping a proposed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub reservation: Reservation,
    pub overlap_days: i64,
}

/// Find every active reservation sharing at least one day with `range`.
///
/// Two inclusive ranges overlap when `a.from <= b.to && b.from <= a.to`.
/// The overlap length is `min(a.to, b.to) - max(a.from, b.from) + 1` days.
pub fn find_conflicts(range: &ProposedRange, reservations: &[Reservation]) -> Vec<Conflict> {
    reservations
        .iter()
        .filter(|r| r.blocks_any(range.from, range.to))
        .map(|r| {
            let overlap_start = r.start_date.max(range.from);
            let overlap_end = r.end_date.min(range.to);
            Conflict {
                reservation: r.clone(),
                overlap_days: (overlap_end - overlap_start).num_days() + 1,
            }
        })
        .collect()
}

/// True if `range` starts no earlier than `today` and collides with nothing.
pub fn is_range_bookable(
    range: &ProposedRange,
    reservations: &[Reservation],
    today: NaiveDate,
) -> bool {
    range.from >= today && find_conflicts(range, reservations).is_empty()
}
