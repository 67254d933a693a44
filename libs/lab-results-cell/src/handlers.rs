use std::sync::Arc;
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::models::UpdateResultsRequest;
use crate::services::LabResultsService;

pub async fn list_patient_blood_tests(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = LabResultsService::new(&config);

    let tests = service.patient_blood_tests(&session, &patient_id).await?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "total": tests.len(),
        "blood_tests": tests
    })))
}

pub async fn update_blood_test(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Path(bt_id): Path<String>,
    Json(request): Json<UpdateResultsRequest>,
) -> Result<Json<Value>, AppError> {
    let service = LabResultsService::new(&config);

    service.update_results(&session, &bt_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "bt_id": bt_id,
        "message": "Blood test results updated"
    })))
}
