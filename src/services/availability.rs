//! Availability / collision-detection engine
//!
//! Pure functions over the booking list: no clock, no store mutation, same
//! inputs always produce the same busy-code set.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    models::{booking::time_hm, find_equipment, Booking},
    store::BookingStore,
};

/// Candidate booking window to check unit availability for.
///
/// All fields are optional: until the form has an equipment type, a date and
/// both times, no constraint can be computed and the busy set is empty.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub equipment_id: Option<String>,
    pub date: Option<NaiveDate>,
    /// Window start, "HH:MM"
    #[serde(default, deserialize_with = "time_hm::deserialize_opt")]
    #[param(value_type = Option<String>, example = "08:00")]
    pub start_time: Option<NaiveTime>,
    /// Window end, "HH:MM"
    #[serde(default, deserialize_with = "time_hm::deserialize_opt")]
    #[param(value_type = Option<String>, example = "10:00")]
    pub end_time: Option<NaiveTime>,
}

/// Computed availability for a candidate window.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    /// Asset codes held by an overlapping active booking
    pub unavailable: Vec<String>,
    /// The equipment's remaining codes, free over the candidate window
    pub available: Vec<String>,
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` intersect iff
/// `s1 < e2 && e1 > s2`. Touching boundaries do not overlap.
pub fn overlaps(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && e1 > s2
}

/// Asset codes unavailable for the candidate window.
///
/// Only PENDING and APPROVED bookings hold units; REJECTED, RETURNED and
/// DRAFT records never block anything. Bookings on another date are ignored
/// (windows never cross midnight). The result is the flattened union of the
/// overlapping bookings' code lists - duplicates are harmless because the
/// caller treats it as a membership set.
pub fn unavailable_asset_codes(candidate: &AvailabilityQuery, bookings: &[Booking]) -> Vec<String> {
    let (Some(equipment_id), Some(date), Some(start), Some(end)) = (
        candidate.equipment_id.as_deref(),
        candidate.date,
        candidate.start_time,
        candidate.end_time,
    ) else {
        return Vec::new();
    };

    bookings
        .iter()
        .filter(|b| b.equipment_id == equipment_id)
        .filter(|b| b.status.holds_assets())
        .filter(|b| b.date == date)
        .filter(|b| overlaps(start, end, b.start_time, b.end_time))
        .flat_map(|b| b.asset_codes.iter().cloned())
        .collect()
}

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<BookingStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<BookingStore>) -> Self {
        Self { store }
    }

    /// Compute the busy and free code sets for a candidate window.
    pub fn check(&self, candidate: &AvailabilityQuery) -> AvailabilityReport {
        let snapshot = self.store.snapshot();
        let unavailable = unavailable_asset_codes(candidate, &snapshot);
        let available = candidate
            .equipment_id
            .as_deref()
            .and_then(find_equipment)
            .map(|equipment| {
                equipment
                    .asset_codes()
                    .filter(|code| !unavailable.contains(code))
                    .collect()
            })
            .unwrap_or_default();
        AvailabilityReport {
            unavailable,
            available,
        }
    }
}
