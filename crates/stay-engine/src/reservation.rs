//! Reservation model and the booking service's JSON wire shape.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::day::parse_day;
use crate::error::{Result, StayError};

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this state takes its days off the calendar.
    pub fn occupies(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(StayError::InvalidStatus(other.to_string())),
        }
    }
}

/// Contact details of the guest holding a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The room summary the booking service embeds in admin listings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomSummary {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Price per night.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A booked or pending occupancy of a resource, at day granularity.
///
/// `start_date..=end_date` is the inclusive set of occupied days. The engine
/// assumes `start_date <= end_date` and does not check it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: String,
    pub resource_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub guest: Guest,
    pub room: Option<RoomSummary>,
    pub created_at: Option<String>,
}

impl Reservation {
    /// Build a reservation with no guest or room details attached.
    pub fn new(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id: id.into(),
            resource_id: resource_id.into(),
            start_date,
            end_date,
            status,
            guest: Guest::default(),
            room: None,
            created_at: None,
        }
    }

    pub fn with_guest(mut self, guest: Guest) -> Self {
        self.guest = guest;
        self
    }

    pub fn with_room(mut self, room: RoomSummary) -> Self {
        self.room = Some(room);
        self
    }

    /// True if this reservation is active and `day` lies in its inclusive range.
    pub fn blocks(&self, day: NaiveDate) -> bool {
        self.status.occupies() && self.start_date <= day && day <= self.end_date
    }

    /// True if this reservation is active and shares at least one day with
    /// `first..=last`.
    pub fn blocks_any(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.status.occupies() && self.start_date <= last && first <= self.end_date
    }
}

/// One element of the booking service's reservation array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReservationRecord {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(default)]
    room_id: Option<String>,
    #[serde(default)]
    room: Option<RoomSummary>,
    start_date: String,
    end_date: String,
    status: ReservationStatus,
    #[serde(default)]
    guest_name: String,
    #[serde(default)]
    guest_email: String,
    #[serde(default)]
    guest_phone: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl ReservationRecord {
    fn into_reservation(self, tz: Tz) -> Result<Reservation> {
        let resource_id = match (self.room_id, self.room.as_ref().and_then(|r| r.id.clone())) {
            (Some(id), _) | (None, Some(id)) => id,
            (None, None) => {
                return Err(StayError::InvalidReservations(format!(
                    "reservation '{}' has neither roomId nor room._id",
                    self.id
                )))
            }
        };

        Ok(Reservation {
            start_date: parse_day(&self.start_date, tz)?,
            end_date: parse_day(&self.end_date, tz)?,
            id: self.id,
            resource_id,
            status: self.status,
            guest: Guest {
                name: self.guest_name,
                email: self.guest_email,
                phone: self.guest_phone,
            },
            room: self.room,
            created_at: self.created_at,
        })
    }
}

/// Parse a JSON array of reservations as returned by the booking service.
///
/// Dates are normalized to calendar days in `tz` (see [`parse_day`]).
///
/// # Errors
/// - `StayError::InvalidReservations` if the JSON does not have the expected shape
///   (including unknown status values).
/// - `StayError::InvalidDate` if a start or end date cannot be parsed.
pub fn load_reservations(json: &str, tz: Tz) -> Result<Vec<Reservation>> {
    let records: Vec<ReservationRecord> = serde_json::from_str(json)
        .map_err(|e| StayError::InvalidReservations(e.to_string()))?;

    let reservations = records
        .into_iter()
        .map(|r| r.into_reservation(tz))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = reservations.len(), timezone = %tz, "loaded reservations");
    Ok(reservations)
}

/// Keep only the reservations for one resource.
pub fn for_resource(reservations: &[Reservation], resource_id: &str) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|r| r.resource_id == resource_id)
        .cloned()
        .collect()
}
