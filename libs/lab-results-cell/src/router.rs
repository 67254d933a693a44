use std::sync::Arc;
use axum::{middleware, routing::{get, put}, Router};
use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers::*;

pub fn lab_results_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/patients/{patient_id}/blood-tests", get(list_patient_blood_tests))
        .route("/blood-tests/{bt_id}", put(update_blood_test))
        .layer(middleware::from_fn(session_middleware))
        .with_state(config)
}
