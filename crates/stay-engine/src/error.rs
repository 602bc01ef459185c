//! Error types for stay-engine operations.
//!
//! The availability predicates themselves cannot fail; these errors come from
//! the edges where raw input (wire JSON, date strings, guest forms) enters.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StayError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid reservation status: {0}")]
    InvalidStatus(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid reservations JSON: {0}")]
    InvalidReservations(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid guest details: {0}")]
    InvalidGuest(String),

    #[error("Invalid range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

pub type Result<T> = std::result::Result<T, StayError>;
