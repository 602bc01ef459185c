//! WASM bindings for stay-engine.
//!
//! Exposes the day predicates, blocked runs, range finalization and conflict
//! detection to a JavaScript booking calendar via `wasm-bindgen`. The
//! reservation snapshot crosses the boundary as the booking service's own JSON
//! array, and days as ISO 8601 strings (a `Date.toISOString()` works).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/stay-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```
//!
//! Each export is a thin wrapper over a plain Rust function returning
//! `Result<_, String>`, so the logic is testable off-wasm.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use stay_engine::availability::{BlockedRun, DayStatus, ProposedRange};
use stay_engine::conflict::Conflict;
use stay_engine::reservation::Reservation;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RangeDto {
    from: String,
    to: String,
    nights: i64,
}

impl From<&ProposedRange> for RangeDto {
    fn from(r: &ProposedRange) -> Self {
        Self {
            from: r.from.to_string(),
            to: r.to.to_string(),
            nights: r.nights(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockedRunDto {
    first: String,
    last: String,
    days: i64,
}

impl From<&BlockedRun> for BlockedRunDto {
    fn from(r: &BlockedRun) -> Self {
        Self {
            first: r.first.to_string(),
            last: r.last.to_string(),
            days: r.days,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDto {
    reservation_id: String,
    start_date: String,
    end_date: String,
    status: String,
    overlap_days: i64,
}

impl From<&Conflict> for ConflictDto {
    fn from(c: &Conflict) -> Self {
        Self {
            reservation_id: c.reservation.id.clone(),
            start_date: c.reservation.start_date.to_string(),
            end_date: c.reservation.end_date.to_string(),
            status: c.reservation.status.to_string(),
            overlap_days: c.overlap_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn timezone(name: &str) -> Result<Tz, String> {
    stay_engine::parse_timezone(name).map_err(|e| e.to_string())
}

fn day(s: &str, tz: Tz) -> Result<NaiveDate, String> {
    stay_engine::parse_day(s, tz).map_err(|e| e.to_string())
}

fn optional_day(s: Option<&str>, tz: Tz) -> Result<Option<NaiveDate>, String> {
    s.filter(|s| !s.trim().is_empty())
        .map(|s| day(s, tz))
        .transpose()
}

fn reservations(json: &str, tz: Tz) -> Result<Vec<Reservation>, String> {
    stay_engine::load_reservations(json, tz).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn status_name(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Past => "past",
        DayStatus::Booked => "booked",
        DayStatus::SpansBooked => "spans_booked",
        DayStatus::Available => "available",
    }
}

// ---------------------------------------------------------------------------
// Plain Rust entry points
// ---------------------------------------------------------------------------

pub fn is_day_blocked_json(reservations_json: &str, day_str: &str, tz_name: &str) -> Result<bool, String> {
    let tz = timezone(tz_name)?;
    let res = reservations(reservations_json, tz)?;
    Ok(stay_engine::is_day_blocked(day(day_str, tz)?, &res))
}

/// `today` defaults to the current day in `tz_name` when absent.
pub fn day_status_json(
    reservations_json: &str,
    day_str: &str,
    tentative_start: Option<&str>,
    today: Option<&str>,
    tz_name: &str,
) -> Result<DayStatus, String> {
    let tz = timezone(tz_name)?;
    let res = reservations(reservations_json, tz)?;
    let today = optional_day(today, tz)?.unwrap_or_else(|| stay_engine::today_in(tz));
    Ok(stay_engine::day_status(
        day(day_str, tz)?,
        &res,
        optional_day(tentative_start, tz)?,
        today,
    ))
}

pub fn blocked_runs_json(
    reservations_json: &str,
    window_start: &str,
    window_end: &str,
    tz_name: &str,
) -> Result<String, String> {
    let tz = timezone(tz_name)?;
    let res = reservations(reservations_json, tz)?;
    let runs = stay_engine::blocked_runs(&res, day(window_start, tz)?, day(window_end, tz)?);
    let dtos: Vec<BlockedRunDto> = runs.iter().map(BlockedRunDto::from).collect();
    to_json(&dtos)
}

/// `None` while the range is incomplete.
pub fn finalize_range_json(
    from: Option<&str>,
    to: Option<&str>,
    tz_name: &str,
) -> Result<Option<String>, String> {
    let tz = timezone(tz_name)?;
    stay_engine::finalize_range(optional_day(from, tz)?, optional_day(to, tz)?)
        .map(|range| to_json(&RangeDto::from(&range)))
        .transpose()
}

pub fn find_conflicts_json(
    reservations_json: &str,
    from: &str,
    to: &str,
    tz_name: &str,
) -> Result<String, String> {
    let tz = timezone(tz_name)?;
    let res = reservations(reservations_json, tz)?;
    let range = ProposedRange::new(day(from, tz)?, day(to, tz)?).map_err(|e| e.to_string())?;
    let conflicts = stay_engine::find_conflicts(&range, &res);
    let dtos: Vec<ConflictDto> = conflicts.iter().map(ConflictDto::from).collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

fn js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

/// True if a pending or confirmed reservation in the snapshot covers `day`.
///
/// # Arguments
/// - `reservations_json` -- JSON array as returned by the booking service
/// - `day` -- ISO 8601 date or date-time
/// - `timezone` -- IANA timezone used to turn instants into calendar days
#[wasm_bindgen(js_name = "isDayBlocked")]
pub fn is_day_blocked(reservations_json: &str, day: &str, timezone: &str) -> Result<bool, JsValue> {
    is_day_blocked_json(reservations_json, day, timezone).map_err(js_err)
}

/// True if `day` can be picked, given the check-in already chosen (if any).
///
/// `today` may be omitted to use the current day in `timezone`.
#[wasm_bindgen(js_name = "isDaySelectable")]
pub fn is_day_selectable(
    reservations_json: &str,
    day: &str,
    tentative_start: Option<String>,
    today: Option<String>,
    timezone: &str,
) -> Result<bool, JsValue> {
    day_status_json(
        reservations_json,
        day,
        tentative_start.as_deref(),
        today.as_deref(),
        timezone,
    )
    .map(|s| s == DayStatus::Available)
    .map_err(js_err)
}

/// One of `"past"`, `"booked"`, `"spans_booked"`, `"available"`.
#[wasm_bindgen(js_name = "dayStatus")]
pub fn day_status(
    reservations_json: &str,
    day: &str,
    tentative_start: Option<String>,
    today: Option<String>,
    timezone: &str,
) -> Result<String, JsValue> {
    day_status_json(
        reservations_json,
        day,
        tentative_start.as_deref(),
        today.as_deref(),
        timezone,
    )
    .map(|s| status_name(s).to_string())
    .map_err(js_err)
}

/// Merged blocked-day runs within an inclusive window, as a JSON array of
/// `{first, last, days}` objects.
#[wasm_bindgen(js_name = "blockedRuns")]
pub fn blocked_runs(
    reservations_json: &str,
    window_start: &str,
    window_end: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    blocked_runs_json(reservations_json, window_start, window_end, timezone).map_err(js_err)
}

/// `{from, to, nights}` JSON once both ends are set and ordered, else `undefined`.
#[wasm_bindgen(js_name = "finalizeRange")]
pub fn finalize_range(
    from: Option<String>,
    to: Option<String>,
    timezone: &str,
) -> Result<Option<String>, JsValue> {
    finalize_range_json(from.as_deref(), to.as_deref(), timezone).map_err(js_err)
}

/// Reservations a proposed stay would collide with, as a JSON array of
/// `{reservationId, startDate, endDate, status, overlapDays}` objects.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(
    reservations_json: &str,
    from: &str,
    to: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    find_conflicts_json(reservations_json, from, to, timezone).map_err(js_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"_id":"b1","roomId":"room-1","startDate":"2024-06-10T00:00:00.000Z",
         "endDate":"2024-06-12T00:00:00.000Z","status":"confirmed"},
        {"_id":"b2","roomId":"room-1","startDate":"2024-06-20T00:00:00.000Z",
         "endDate":"2024-06-21T00:00:00.000Z","status":"cancelled"}
    ]"#;

    #[test]
    fn blocked_day_from_service_json() {
        assert!(is_day_blocked_json(SNAPSHOT, "2024-06-11", "UTC").unwrap());
        assert!(!is_day_blocked_json(SNAPSHOT, "2024-06-20", "UTC").unwrap());
    }

    #[test]
    fn status_walks_from_tentative_start() {
        let status =
            day_status_json(SNAPSHOT, "2024-06-13", Some("2024-06-05"), Some("2024-06-01"), "UTC")
                .unwrap();
        assert_eq!(status, DayStatus::SpansBooked);
        assert_eq!(status_name(status), "spans_booked");
    }

    #[test]
    fn empty_tentative_start_is_treated_as_none() {
        let status =
            day_status_json(SNAPSHOT, "2024-06-13", Some(""), Some("2024-06-01"), "UTC").unwrap();
        assert_eq!(status, DayStatus::Available);
    }

    #[test]
    fn finalize_returns_none_until_complete() {
        assert_eq!(finalize_range_json(Some("2024-07-01"), None, "UTC").unwrap(), None);

        let json = finalize_range_json(Some("2024-07-01"), Some("2024-07-05"), "UTC")
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["from"], "2024-07-01");
        assert_eq!(value["nights"], 4);
    }

    #[test]
    fn conflicts_and_runs_serialize() {
        let conflicts = find_conflicts_json(SNAPSHOT, "2024-06-11", "2024-06-25", "UTC").unwrap();
        let value: serde_json::Value = serde_json::from_str(&conflicts).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["reservationId"], "b1");
        assert_eq!(value[0]["overlapDays"], 2);

        let runs = blocked_runs_json(SNAPSHOT, "2024-06-01", "2024-06-30", "UTC").unwrap();
        let value: serde_json::Value = serde_json::from_str(&runs).unwrap();
        assert_eq!(value[0]["first"], "2024-06-10");
        assert_eq!(value[0]["days"], 3);
    }

    #[test]
    fn reversed_window_yields_empty_runs() {
        let runs = blocked_runs_json(SNAPSHOT, "2024-06-30", "2024-06-01", "UTC").unwrap();
        assert_eq!(runs, "[]");
    }

    #[test]
    fn bad_inputs_surface_as_messages() {
        assert!(is_day_blocked_json("not json", "2024-06-11", "UTC")
            .unwrap_err()
            .contains("Invalid reservations JSON"));
        assert!(is_day_blocked_json(SNAPSHOT, "2024-06-11", "Nowhere/City")
            .unwrap_err()
            .contains("Invalid timezone"));
        assert!(find_conflicts_json(SNAPSHOT, "2024-06-12", "2024-06-11", "UTC").is_err());
    }
}
