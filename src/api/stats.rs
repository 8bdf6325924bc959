//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Labelled count pair for charts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

/// One bar of the monthly trend chart
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyCount {
    /// Malay month label (Jan .. Dis)
    pub month: String,
    pub bookings: i64,
}

/// One row of the top-borrowers list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowerCount {
    pub name: String,
    pub count: i64,
}

/// Current stock estimate for one equipment type
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    pub equipment_id: String,
    pub name: String,
    pub total_stock: i64,
    /// `total_stock` minus units held by APPROVED bookings, floored at zero
    pub remaining: i64,
}

/// Full dashboard summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Bookings currently holding inventory (PENDING + APPROVED)
    pub active_bookings: i64,
    pub approved_bookings: i64,
    /// Most-booked equipment name, if any bookings exist
    pub popular_equipment: Option<String>,
    pub monthly_trend: Vec<MonthlyCount>,
    pub equipment_usage: Vec<StatEntry>,
    pub top_borrowers: Vec<BorrowerCount>,
    pub stock_status: Vec<StockStatus>,
}

/// Dashboard summary over the current booking list
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<DashboardResponse>> {
    Ok(Json(state.services.stats.dashboard()))
}
