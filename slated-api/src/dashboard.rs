use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use slated_schedule::selector::{select_with_grace, TemporalSelection};
use slated_shared::models::appointment::{Appointment, AppointmentStatus};

use crate::error::AppError;
use crate::state::AppState;

/// Dashboard view: derived current/next plus headline counts. Recomputed
/// from the store on every request, never cached here.
#[derive(Debug, Serialize)]
struct DashboardSummary {
    current: Option<Appointment>,
    next: Option<Appointment>,
    confirmed_today: usize,
    pending: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/dashboard", get(dashboard_summary))
}

async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let appointments = state
        .repo
        .list_appointments()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let now = Utc::now();
    let TemporalSelection { current, next } = select_with_grace(
        now,
        &appointments,
        state.business_rules.grace_period_minutes,
    );

    let today = now.date_naive();
    let confirmed_today = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Confirmed && a.scheduled_at.date_naive() == today)
        .count();
    let pending = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Pending)
        .count();

    Ok(Json(DashboardSummary {
        current,
        next,
        confirmed_today,
        pending,
    }))
}
