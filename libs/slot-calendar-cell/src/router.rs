// libs/slot-calendar-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/doctors", get(handlers::get_department_doctors))
        .route("/slots", get(handlers::get_day_slots))
        .route("/slots/{ts_id}", get(handlers::get_slot_interval));

    // Routes that act on behalf of the signed-in user
    let session_routes = Router::new()
        .route("/calendar", get(handlers::get_appointment_calendar))
        .route("/agenda", get(handlers::get_doctor_agenda))
        .route("/appointments", post(handlers::book_appointment))
        .route("/unavailability", post(handlers::declare_unavailability))
        .layer(middleware::from_fn(session_middleware));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .with_state(state)
}
