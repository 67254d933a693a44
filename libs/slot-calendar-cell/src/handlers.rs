// libs/slot-calendar-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::{Datelike, Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::models::{BookSlotRequest, DeclareUnavailabilityRequest, SlotConfig, TimeSlotId};
use crate::services::schedule::ScheduleService;
use crate::services::slots::slot_to_interval;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct DaySlotsQuery {
    pub doctor_id: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct DoctorsQuery {
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct AgendaQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

fn clinic_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ==============================================================================
// PUBLIC HANDLERS
// ==============================================================================

pub async fn get_day_slots(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<DaySlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&config)?;

    let response = service.doctor_day_schedule(&query.doctor_id, &query.date).await?;

    Ok(Json(json!(response)))
}

pub async fn get_department_doctors(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<DoctorsQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&config)?;

    let listing = service.doctors_in_department(&query.department).await?;

    Ok(Json(json!({
        "department": listing.department,
        "total": listing.doctors.len(),
        "doctors": listing.doctors
    })))
}

pub async fn get_slot_interval(
    State(config): State<Arc<AppConfig>>,
    Path(ts_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let slot_config = SlotConfig::from_app_config(&config)?;
    let slot: TimeSlotId = ts_id.parse()?;
    let interval = slot_to_interval(slot.index(), &slot_config)?;

    Ok(Json(json!({
        "ts_id": slot,
        "interval": interval,
        "label": interval.label()
    })))
}

// ==============================================================================
// SESSION HANDLERS
// ==============================================================================

pub async fn get_appointment_calendar(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&config)?;
    let now = clinic_now();

    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());

    let overview = service.appointment_calendar(&session, year, month, now).await?;

    Ok(Json(json!(overview)))
}

pub async fn get_doctor_agenda(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Query(query): Query<AgendaQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&config)?;

    let agenda = service.doctor_agenda(&session, &query.date).await?;

    Ok(Json(json!(agenda)))
}

pub async fn book_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Json(request): Json<BookSlotRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&config)?;

    let confirmation = service
        .book_slot(&session, &request.doctor_id, &request.ts_id, &request.date, clinic_now())
        .await?;

    Ok(Json(json!({
        "success": true,
        "appointment": confirmation,
        "message": "Appointment booked"
    })))
}

pub async fn declare_unavailability(
    State(config): State<Arc<AppConfig>>,
    Extension(session): Extension<Session>,
    Json(request): Json<DeclareUnavailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&config)?;

    let confirmation = service
        .declare_unavailability(&session, &request.ts_id, &request.date, clinic_now())
        .await?;

    Ok(Json(json!({
        "success": true,
        "unavailability": confirmation
    })))
}
