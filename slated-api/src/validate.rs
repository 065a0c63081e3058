use axum::{extract::State, routing::post, Json, Router};

use slated_schedule::validation::{AppointmentDraft, ValidationResult};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/appointments/validate", post(validate_draft))
}

/// Interactive pre-check for the booking form. Each call supersedes any
/// earlier one still in flight; the response always reflects the newest
/// request's state.
async fn validate_draft(
    State(state): State<AppState>,
    Json(draft): Json<AppointmentDraft>,
) -> Json<ValidationResult> {
    Json(state.validator.validate(&draft).await)
}
