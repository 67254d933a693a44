use std::sync::Arc;
use axum::{middleware, routing::post, Router};
use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers::*;

pub fn feedback_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(submit_feedback))
        .layer(middleware::from_fn(session_middleware))
        .with_state(config)
}
