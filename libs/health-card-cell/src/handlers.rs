use std::sync::Arc;
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::services::HealthCardService;

pub async fn get_own_health_card(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Value>, AppError> {
    let service = HealthCardService::new(&config);

    let card = service.get_card(&session, &session.user_id).await?;

    Ok(Json(json!(card)))
}

pub async fn get_patient_health_card(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = HealthCardService::new(&config);

    let card = service.get_card(&session, &patient_id).await?;

    Ok(Json(json!(card)))
}
