//! Day-level availability for a single resource.
//!
//! Everything here is a pure function of its arguments: the reservation
//! snapshot, the day in question, an optional tentative start, and "today".
//! A calendar renderer calls [`is_day_selectable`] (or [`day_status`]) once per
//! visible day per render pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::days_inclusive;
use crate::error::{Result, StayError};
use crate::reservation::Reservation;

/// Why a calendar day can or cannot be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Strictly before today.
    Past,
    /// Occupied by a pending or confirmed reservation.
    Booked,
    /// Free itself, but the range from the tentative start to it crosses a booked day.
    SpansBooked,
    Available,
}

/// A complete check-in / check-out selection. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposedRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ProposedRange {
    /// # Errors
    /// Returns `StayError::InvalidRange` if `to` is before `from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if to < from {
            return Err(StayError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Nights between check-in and check-out. Zero when `from == to`.
    pub fn nights(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Every day in the range, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_inclusive(self.from, self.to)
    }
}

/// A maximal run of consecutive blocked days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedRun {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub days: i64,
}

/// True if any pending or confirmed reservation covers `day`.
///
/// Cancelled reservations never block.
pub fn is_day_blocked(day: NaiveDate, reservations: &[Reservation]) -> bool {
    reservations.iter().any(|r| r.blocks(day))
}

/// Classify `day` for a calendar picker.
///
/// Rules are checked in order:
/// 1. before `today` → [`DayStatus::Past`]
/// 2. blocked → [`DayStatus::Booked`]
/// 3. a tentative start exists, `day` is after it, and some day in
///    `tentative_start..=day` is blocked → [`DayStatus::SpansBooked`]
///
/// Days on or before the tentative start only go through rules 1 and 2.
pub fn day_status(
    day: NaiveDate,
    reservations: &[Reservation],
    tentative_start: Option<NaiveDate>,
    today: NaiveDate,
) -> DayStatus {
    if day < today {
        return DayStatus::Past;
    }
    if is_day_blocked(day, reservations) {
        return DayStatus::Booked;
    }
    if let Some(start) = tentative_start {
        if day > start && reservations.iter().any(|r| r.blocks_any(start, day)) {
            return DayStatus::SpansBooked;
        }
    }
    DayStatus::Available
}

/// True if `day` can be picked, either as a start or, when `tentative_start` is
/// set, as the end of a range that does not cross a booked day.
pub fn is_day_selectable(
    day: NaiveDate,
    reservations: &[Reservation],
    tentative_start: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    day_status(day, reservations, tentative_start, today) == DayStatus::Available
}

/// Turn a pair of picks into a complete range.
///
/// Returns `None` while either end is missing, or if `to` is before `from`.
/// A zero-night range (`from == to`) is returned as complete; minimum-stay
/// rules belong to the caller.
pub fn finalize_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<ProposedRange> {
    match (from, to) {
        (Some(from), Some(to)) => ProposedRange::new(from, to).ok(),
        _ => None,
    }
}

/// Blocked days within `[window_start, window_end]`, merged into runs.
///
/// Each active reservation is clipped to the window; overlapping or adjacent
/// spans are merged. Output is sorted and non-overlapping. A reversed window
/// (`window_end < window_start`) is empty.
pub fn blocked_runs(
    reservations: &[Reservation],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<BlockedRun> {
    if window_end < window_start {
        return Vec::new();
    }

    let mut spans: Vec<(NaiveDate, NaiveDate)> = reservations
        .iter()
        .filter(|r| r.blocks_any(window_start, window_end))
        .map(|r| (r.start_date.max(window_start), r.end_date.min(window_end)))
        .collect();

    spans.sort_unstable();

    let mut merged: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    for (first, last) in spans {
        if let Some(prev) = merged.last_mut() {
            // Touching days (prev ends on the 10th, next starts on the 11th) merge too.
            if (first - prev.1).num_days() <= 1 {
                prev.1 = prev.1.max(last);
                continue;
            }
        }
        merged.push((first, last));
    }

    merged
        .into_iter()
        .map(|(first, last)| BlockedRun {
            first,
            last,
            days: (last - first).num_days() + 1,
        })
        .collect()
}
