//! Booking management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{ApproveBooking, Booking, BookingOverview, BookingQuery, CreateBooking},
};

/// Status-change response
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    /// Resulting status label
    pub status: String,
    /// Updated booking record
    pub booking: Booking,
}

/// List bookings, newest first
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Substring match on name, class or equipment")
    ),
    responses(
        (status = 200, description = "Booking list", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    Ok(Json(state.services.bookings.list(&query)))
}

/// Admin overview: pending / in-use / history partitions
#[utoipa::path(
    get,
    path = "/bookings/overview",
    tag = "bookings",
    responses(
        (status = 200, description = "Partitioned booking lists", body = BookingOverview)
    )
)]
pub async fn booking_overview(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookingOverview>> {
    Ok(Json(state.services.bookings.overview()))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    Ok(Json(state.services.bookings.get(&id)?))
}

/// Submit a new booking request
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking submitted", body = Booking),
        (status = 400, description = "Missing fields or invalid asset codes"),
        (status = 409, description = "Requested units already booked for this window"),
        (status = 422, description = "Per-booking unit limit exceeded")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.submit(data)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Save a booking draft (holds no inventory)
#[utoipa::path(
    post,
    path = "/bookings/drafts",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Draft saved", body = Booking),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn create_draft(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.save_draft(data)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Submit a saved draft for approval
#[utoipa::path(
    post,
    path = "/bookings/{id}/submit",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Draft submitted", body = StatusResponse),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Requested units already booked for this window"),
        (status = 422, description = "Not a draft")
    )
)]
pub async fn submit_draft(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let booking = state.services.bookings.submit_draft(&id)?;
    Ok(Json(StatusResponse {
        status: booking.status.to_string(),
        booking,
    }))
}

/// Approve a pending booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/approve",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = ApproveBooking,
    responses(
        (status = 200, description = "Booking approved", body = StatusResponse),
        (status = 400, description = "Approver name missing"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not pending")
    )
)]
pub async fn approve_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(request): Json<ApproveBooking>,
) -> AppResult<Json<StatusResponse>> {
    let booking = state.services.bookings.approve(&id, &request.admin_name)?;
    Ok(Json(StatusResponse {
        status: booking.status.to_string(),
        booking,
    }))
}

/// Reject a pending booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/reject",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking rejected", body = StatusResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not pending")
    )
)]
pub async fn reject_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let booking = state.services.bookings.reject(&id)?;
    Ok(Json(StatusResponse {
        status: booking.status.to_string(),
        booking,
    }))
}

/// Mark an approved booking as returned
#[utoipa::path(
    post,
    path = "/bookings/{id}/return",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Equipment returned", body = StatusResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not approved")
    )
)]
pub async fn return_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let booking = state.services.bookings.return_booking(&id)?;
    Ok(Json(StatusResponse {
        status: booking.status.to_string(),
        booking,
    }))
}

/// Permanently delete a booking record
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
