//! Booking model and related types

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BookingStatus;

/// Serde for times-of-day carried as fixed-width `"HH:MM"` strings.
///
/// Comparison always happens on the parsed `NaiveTime`, never on the string
/// form. `"HH:MM:SS"` is accepted on input since some sheet clients append
/// seconds.
pub mod time_hm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}'", raw)))
    }

    /// For optional query parameters; an absent or empty value is `None`,
    /// anything else must parse.
    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}'", raw))),
        }
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }
}

/// Malay weekday name for a calendar date (informational `day` field).
pub fn malay_weekday(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Isnin",
        chrono::Weekday::Tue => "Selasa",
        chrono::Weekday::Wed => "Rabu",
        chrono::Weekday::Thu => "Khamis",
        chrono::Weekday::Fri => "Jumaat",
        chrono::Weekday::Sat => "Sabtu",
        chrono::Weekday::Sun => "Ahad",
    }
}

fn default_status() -> BookingStatus {
    BookingStatus::Pending
}

/// Sheet rows occasionally carry statuses this version does not know;
/// default those to PENDING instead of rejecting the whole row.
fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BookingStatus, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(BookingStatus::Pending))
}

/// A reservation request for one or more units of an equipment type over a
/// same-day time window.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub student_name: String,
    /// Calendar day of use; a booking's window lies entirely within one day
    pub date: NaiveDate,
    /// Derived weekday name, informational only
    #[serde(default)]
    pub day: String,
    #[serde(with = "time_hm")]
    #[schema(value_type = String, example = "08:00")]
    pub start_time: NaiveTime,
    #[serde(with = "time_hm")]
    #[schema(value_type = String, example = "10:00")]
    pub end_time: NaiveTime,
    pub class_name: String,
    pub location: String,
    pub purpose: String,
    pub equipment_id: String,
    /// Always equals `asset_codes.len()`; kept on the wire for the sheet
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub quantity: u32,
    /// Unit identifiers this booking claims, e.g. `["CHR-1", "CHR-2"]`
    #[serde(default)]
    pub asset_codes: Vec<String>,
    #[serde(default = "default_status", deserialize_with = "lenient_status")]
    pub status: BookingStatus,
    /// Creation time in milliseconds since the epoch; newest-first sort key
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub timestamp: i64,
    /// Name of the admin who approved, set on transition to APPROVED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    /// Formatted wall-clock time, set on transition to RETURNED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<String>,
}

/// Booking submission payload (new booking or saved draft).
///
/// `quantity` is not accepted from the client; it is derived from the asset
/// code selection.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(length(min = 1, message = "student name is required"))]
    pub student_name: String,
    pub date: NaiveDate,
    #[serde(with = "time_hm")]
    #[schema(value_type = String, example = "08:00")]
    pub start_time: NaiveTime,
    #[serde(with = "time_hm")]
    #[schema(value_type = String, example = "10:00")]
    pub end_time: NaiveTime,
    #[validate(length(min = 1, message = "class name is required"))]
    pub class_name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "purpose is required"))]
    pub purpose: String,
    #[validate(length(min = 1, message = "equipment id is required"))]
    pub equipment_id: String,
    #[serde(default)]
    pub asset_codes: Vec<String>,
}

/// Approval confirmation payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBooking {
    /// Name of the officer recorded as approver
    pub admin_name: String,
}

/// Optional filters for the booking list (borrower-list view).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    /// Case-insensitive substring match on student name, class or equipment id
    pub search: Option<String>,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref() {
            let term = term.to_lowercase();
            if !term.is_empty() {
                let hit = booking.student_name.to_lowercase().contains(&term)
                    || booking.class_name.to_lowercase().contains(&term)
                    || booking.equipment_id.to_lowercase().contains(&term);
                if !hit {
                    return false;
                }
            }
        }
        true
    }
}

/// Admin read model: the store partitioned by lifecycle stage.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingOverview {
    /// Awaiting an approve/reject decision
    pub pending: Vec<Booking>,
    /// Approved and not yet returned
    pub in_use: Vec<Booking>,
    /// Everything decided or finished (drafts excluded)
    pub history: Vec<Booking>,
}
