//! The payload handed to the booking service once a range is complete.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::availability::ProposedRange;
use crate::error::{Result, StayError};

/// What the guest typed into the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A validated booking submission, serialized in the service's camelCase shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: String,
    #[serde(serialize_with = "midnight_utc")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "midnight_utc")]
    pub end_date: NaiveDate,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
}

impl BookingRequest {
    /// Build a submission from a complete range and the guest form.
    ///
    /// All fields are trimmed. The range itself is not re-checked against
    /// availability here; pair with [`crate::conflict::is_range_bookable`].
    ///
    /// # Errors
    /// Returns `StayError::InvalidGuest` if the room id, name or phone is blank,
    /// or if the email is not of the form `local@domain`.
    pub fn new(resource_id: &str, range: ProposedRange, guest: &GuestInfo) -> Result<Self> {
        let room_id = required("room id", resource_id)?;
        let guest_name = required("name", &guest.name)?;
        let guest_phone = required("phone", &guest.phone)?;
        let guest_email = required("email", &guest.email)?;

        match guest_email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(StayError::InvalidGuest(format!(
                    "email '{}' is not a valid address",
                    guest_email
                )))
            }
        }

        Ok(Self {
            room_id,
            start_date: range.from,
            end_date: range.to,
            guest_name,
            guest_email,
            guest_phone,
        })
    }

    pub fn range(&self) -> ProposedRange {
        ProposedRange {
            from: self.start_date,
            to: self.end_date,
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StayError::InvalidGuest(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn midnight_utc<S: Serializer>(day: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&day.format("%Y-%m-%dT00:00:00.000Z").to_string())
}
