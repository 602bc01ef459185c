//! # stay-engine
//!
//! Day-granular availability for bookable rooms.
//!
//! Given a snapshot of a room's reservations, the engine answers the two
//! questions a booking calendar asks for every visible day: is this day taken,
//! and can the guest pick it (as check-in, or as check-out given the check-in
//! already chosen). It also drives the range-picking flow and the
//! administrator's booking list.
//!
//! ## Modules
//!
//! - [`day`] — ISO 8601 strings → calendar days in a time zone
//! - [`reservation`] — Reservation model and the booking service's JSON shape
//! - [`availability`] — Blocked / selectable day predicates, blocked runs
//! - [`selection`] — `Empty → StartSelected → RangeComplete` picking flow
//! - [`conflict`] — Reservations a proposed stay would collide with
//! - [`booking`] — Validated booking submission payload
//! - [`ledger`] — Booking list filtering, search and stay totals
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod conflict;
pub mod day;
pub mod error;
pub mod ledger;
pub mod reservation;
pub mod selection;

pub use availability::{
    blocked_runs, day_status, finalize_range, is_day_blocked, is_day_selectable, BlockedRun,
    DayStatus, ProposedRange,
};
pub use booking::{BookingRequest, GuestInfo};
pub use conflict::{find_conflicts, is_range_bookable, Conflict};
pub use day::{parse_day, parse_timezone, today_in};
pub use error::StayError;
pub use reservation::{load_reservations, Reservation, ReservationStatus};
pub use selection::{RangeSelection, SelectOutcome};
