use std::sync::Arc;
use axum::{middleware, routing::{get, patch}, Router};
use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers::*;

pub fn inventory_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/equipment", get(list_equipment).post(create_equipment))
        .route("/equipment/{id}", patch(update_amount))
        .layer(middleware::from_fn(session_middleware))
        .with_state(config)
}
