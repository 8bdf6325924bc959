//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a booking.
///
/// Wire format is SCREAMING_CASE, matching the rows already stored in the
/// remote sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Returned,
}

impl BookingStatus {
    /// Whether a booking in this status currently holds its asset codes.
    ///
    /// A pending request provisionally reserves its units, so two requests
    /// cannot claim the same unit during the approval window.
    pub fn holds_assets(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Deletion is allowed from any status and is not a transition.
    pub fn can_transition(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Draft, BookingStatus::Pending)
                | (BookingStatus::Pending, BookingStatus::Approved)
                | (BookingStatus::Pending, BookingStatus::Rejected)
                | (BookingStatus::Approved, BookingStatus::Returned)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Draft => "DRAFT",
            BookingStatus::Pending => "PENDING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Returned => "RETURNED",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(BookingStatus::Draft),
            "PENDING" => Ok(BookingStatus::Pending),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "RETURNED" => Ok(BookingStatus::Returned),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}
