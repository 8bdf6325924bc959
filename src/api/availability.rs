//! Availability check endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    services::availability::{AvailabilityQuery, AvailabilityReport},
};

/// Busy and free asset codes for a candidate booking window.
///
/// With any of the parameters missing no constraint can be computed yet and
/// the unavailable set is empty, matching the incremental form flow.
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability for the candidate window", body = AvailabilityReport)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityReport>> {
    Ok(Json(state.services.availability.check(&query)))
}
