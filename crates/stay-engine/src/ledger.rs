//! Administrator booking list: filtering, search, stay totals, local updates.
//!
//! These operate on the same reservation snapshot as the availability engine.
//! Local updates mirror a status change or deletion already accepted by the
//! booking service, so the list can be redrawn without a refetch.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{Result, StayError};
use crate::reservation::{Reservation, ReservationStatus};

/// Restrict the list to one status, or show everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReservationStatus),
}

impl FromStr for StatusFilter {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Restrict the list by where a stay sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    /// Check-in today or later.
    Upcoming,
    /// Check-out strictly before today.
    Past,
}

impl FromStr for DateFilter {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => Err(StayError::InvalidFilter(format!(
                "unknown date filter '{}' (expected all, upcoming or past)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingFilter {
    pub status: StatusFilter,
    pub when: DateFilter,
    /// Matched against guest name and email ignoring case, and against phone verbatim.
    pub search: Option<String>,
    /// One guest's bookings: whole-address match on email, ignoring case.
    pub guest_email: Option<String>,
}

impl BookingFilter {
    pub fn matches(&self, reservation: &Reservation, today: NaiveDate) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => reservation.status == status,
        };
        let when_ok = match self.when {
            DateFilter::All => true,
            DateFilter::Upcoming => reservation.start_date >= today,
            DateFilter::Past => reservation.end_date < today,
        };
        let guest_ok = match self.guest_email.as_deref() {
            Some(email) => reservation.guest.email.trim().eq_ignore_ascii_case(email.trim()),
            None => true,
        };
        status_ok && when_ok && guest_ok && self.search_matches(reservation)
    }

    fn search_matches(&self, reservation: &Reservation) -> bool {
        let term = match self.search.as_deref() {
            Some(term) if !term.is_empty() => term,
            _ => return true,
        };
        let needle = term.to_lowercase();
        let guest = &reservation.guest;
        guest.name.to_lowercase().contains(&needle)
            || guest.email.to_lowercase().contains(&needle)
            || guest.phone.contains(term)
    }
}

/// Reservations matching `filter`, in their original order.
pub fn filter_reservations<'a>(
    reservations: &'a [Reservation],
    filter: &BookingFilter,
    today: NaiveDate,
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| filter.matches(r, today))
        .collect()
}

/// Nights between check-in and check-out.
pub fn nights(reservation: &Reservation) -> i64 {
    (reservation.end_date - reservation.start_date).num_days()
}

/// Nights times the room's nightly price, if the listing carries a price.
pub fn stay_total(reservation: &Reservation) -> Option<f64> {
    let price = reservation.room.as_ref()?.price?;
    Some(nights(reservation) as f64 * price)
}

/// Apply a status change locally. Returns false if `id` is not in the list.
pub fn set_status(reservations: &mut [Reservation], id: &str, status: ReservationStatus) -> bool {
    match reservations.iter_mut().find(|r| r.id == id) {
        Some(r) => {
            r.status = status;
            true
        }
        None => false,
    }
}

/// Drop a deleted reservation locally. Returns false if `id` is not in the list.
pub fn remove(reservations: &mut Vec<Reservation>, id: &str) -> bool {
    let before = reservations.len();
    reservations.retain(|r| r.id != id);
    reservations.len() != before
}
