use std::sync::Arc;
use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::models::SubmitFeedbackRequest;
use crate::services::FeedbackService;

pub async fn submit_feedback(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<Json<Value>, AppError> {
    let service = FeedbackService::new(&config);

    let message = service.submit(&session, request).await?;

    Ok(Json(json!({
        "success": true,
        "message": message.unwrap_or_else(|| "Feedback submitted".to_string())
    })))
}
