//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, equipment, health, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "e-ICT API",
        version = "1.0.0",
        description = "School Equipment Booking System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Unit ICT SMA MAIWP Labuan", email = "ict@smamaiwp.edu.my")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::get_catalog,
        // Bookings
        bookings::list_bookings,
        bookings::booking_overview,
        bookings::get_booking,
        bookings::create_booking,
        bookings::create_draft,
        bookings::submit_draft,
        bookings::approve_booking,
        bookings::reject_booking,
        bookings::return_booking,
        bookings::delete_booking,
        // Availability
        availability::check_availability,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::EquipmentConfig,
            equipment::EquipmentDetails,
            equipment::CatalogResponse,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::booking::ApproveBooking,
            crate::models::booking::BookingOverview,
            crate::models::enums::BookingStatus,
            bookings::StatusResponse,
            // Availability
            crate::services::availability::AvailabilityReport,
            // Stats
            stats::DashboardResponse,
            stats::StatEntry,
            stats::MonthlyCount,
            stats::BorrowerCount,
            stats::StockStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "bookings", description = "Booking lifecycle management"),
        (name = "availability", description = "Asset availability checks"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
