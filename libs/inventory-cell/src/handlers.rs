use std::sync::Arc;
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::models::{CreateEquipmentRequest, UpdateAmountRequest};
use crate::services::InventoryService;

pub async fn list_equipment(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(&config);

    let equipment = service.list_equipment(&session).await?;

    Ok(Json(json!({
        "equipment": equipment,
        "total": equipment.len()
    })))
}

pub async fn create_equipment(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(&config);

    let equipment = service.create_equipment(&session, request).await?;

    Ok(Json(json!({
        "success": true,
        "equipment": equipment
    })))
}

pub async fn update_amount(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Path(equipment_id): Path<String>,
    Json(request): Json<UpdateAmountRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(&config);

    service.update_amount(&session, &equipment_id, request.amount).await?;

    Ok(Json(json!({
        "success": true,
        "id": equipment_id,
        "amount": request.amount
    })))
}
