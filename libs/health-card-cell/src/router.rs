use std::sync::Arc;
use axum::{middleware, routing::get, Router};
use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers::*;

pub fn health_card_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(get_own_health_card))
        .route("/{patient_id}", get(get_patient_health_card))
        .layer(middleware::from_fn(session_middleware))
        .with_state(config)
}
