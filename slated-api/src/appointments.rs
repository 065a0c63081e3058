use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use slated_core::conflict::ConflictCheckRequest;
use slated_schedule::duration::occupied_minutes;
use slated_shared::models::appointment::{Appointment, AppointmentStatus, ServiceLine};
use slated_shared::models::events::{InvalidationEvent, MutationKind};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: Uuid,
    pub services: Vec<ServiceLine>,
    pub scheduled_at: DateTime<Utc>,
    pub address: Option<String>,
    #[serde(default)]
    pub travel_minutes: i64,
    #[serde(default)]
    pub include_travel: bool,
}

#[derive(Debug, Serialize)]
struct AppointmentResponse {
    appointment_id: Uuid,
    status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
struct StatusChangeRequest {
    status: AppointmentStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/appointments",
            post(create_appointment).get(list_appointments),
        )
        .route("/v1/appointments/{id}/status", post(change_status))
        .route("/v1/appointments/{id}", delete(delete_appointment))
}

async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    if req.services.is_empty() {
        return Err(AppError::ValidationError(
            "at least one service is required".to_string(),
        ));
    }
    if req.services.iter().any(|s| s.duration_minutes < 0) || req.travel_minutes < 0 {
        return Err(AppError::ValidationError(
            "durations must be non-negative".to_string(),
        ));
    }
    if req.include_travel
        && req
            .address
            .as_deref()
            .map_or(true, |a| a.trim().is_empty())
    {
        return Err(AppError::ValidationError(
            "address is required when travel is enabled".to_string(),
        ));
    }

    let total_service: i64 = req.services.iter().map(ServiceLine::total_minutes).sum();
    let occupied = occupied_minutes(total_service, req.travel_minutes, req.include_travel);

    // Authoritative conflict check. Travel minutes are already resolved
    // into the occupied window here, so no address goes along.
    let verdict = state
        .checker
        .check(&ConflictCheckRequest {
            proposed_start: req.scheduled_at,
            proposed_end: req.scheduled_at + Duration::minutes(occupied),
            client_address: None,
        })
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if !verdict.is_valid {
        return Err(AppError::ConflictError(
            verdict
                .conflict_message
                .unwrap_or_else(|| "requested time is no longer available".to_string()),
        ));
    }

    // Travel disabled means travel minutes are not persisted at all.
    let now = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        client_id: req.client_id,
        service_id: req.services[0].service_id,
        scheduled_at: req.scheduled_at,
        duration_minutes: total_service,
        travel_minutes: if req.include_travel { req.travel_minutes } else { 0 },
        address: if req.include_travel { req.address } else { None },
        status: AppointmentStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let id = state
        .repo
        .create_appointment(&appointment)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    state
        .bus
        .publish(InvalidationEvent::new(id, MutationKind::Created));
    info!("Appointment booked: {}", id);

    Ok(Json(AppointmentResponse {
        appointment_id: id,
        status: appointment.status,
    }))
}

async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state
        .repo
        .list_appointments()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(appointments))
}

async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    state
        .repo
        .update_status(id, req.status)
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .bus
        .publish(InvalidationEvent::new(id, MutationKind::Updated));

    Ok(Json(AppointmentResponse {
        appointment_id: id,
        status: req.status,
    }))
}

async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let existing = state
        .repo
        .get_appointment(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("appointment not found: {}", id)))?;

    state
        .repo
        .delete_appointment(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    state
        .bus
        .publish(InvalidationEvent::new(id, MutationKind::Deleted));
    info!("Appointment removed: {}", id);

    Ok(Json(AppointmentResponse {
        appointment_id: id,
        status: existing.status,
    }))
}
