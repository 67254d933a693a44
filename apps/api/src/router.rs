use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use feedback_cell::router::feedback_routes;
use health_card_cell::router::health_card_routes;
use inventory_cell::router::inventory_routes;
use lab_results_cell::router::lab_results_routes;
use shared_config::AppConfig;
use slot_calendar_cell::router::schedule_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hastane clinic API is running!" }))
        .nest("/schedule", schedule_routes(state.clone()))
        .nest("/inventory", inventory_routes(state.clone()))
        .nest("/feedback", feedback_routes(state.clone()))
        .nest("/health-card", health_card_routes(state.clone()))
        .nest("/lab-results", lab_results_routes(state))
}
