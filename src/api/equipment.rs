//! Equipment catalog endpoints

use axum::{extract::Path, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{find_equipment, EquipmentConfig, CLASS_LIST, EQUIPMENT_CATALOG, LOCATION_LIST},
};

/// Catalog entry with its derived asset codes
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDetails {
    #[serde(flatten)]
    pub config: EquipmentConfig,
    /// All valid unit codes, `{prefix}-1` .. `{prefix}-{totalStock}`
    pub asset_codes: Vec<String>,
}

/// Everything the booking form needs to render its dropdowns
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub equipment: Vec<EquipmentConfig>,
    pub class_list: Vec<String>,
    pub location_list: Vec<String>,
}

/// List the equipment catalog
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment catalog", body = Vec<EquipmentConfig>)
    )
)]
pub async fn list_equipment() -> Json<Vec<EquipmentConfig>> {
    Json(EQUIPMENT_CATALOG.clone())
}

/// Get one equipment type with its asset codes
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentDetails),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(Path(id): Path<String>) -> AppResult<Json<EquipmentDetails>> {
    let config = find_equipment(&id)
        .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))?;
    Ok(Json(EquipmentDetails {
        config: config.clone(),
        asset_codes: config.asset_codes().collect(),
    }))
}

/// Full form catalog: equipment plus class and location lists
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "equipment",
    responses(
        (status = 200, description = "Form catalog", body = CatalogResponse)
    )
)]
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        equipment: EQUIPMENT_CATALOG.clone(),
        class_list: CLASS_LIST.iter().map(|s| s.to_string()).collect(),
        location_list: LOCATION_LIST.iter().map(|s| s.to_string()).collect(),
    })
}
