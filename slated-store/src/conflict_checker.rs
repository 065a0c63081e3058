use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tracing::info;

use slated_core::conflict::{ConflictCheckRequest, ConflictCheckResponse, ConflictChecker};
use slated_core::repository::AppointmentRepository;
use slated_core::travel::TravelTimeProvider;
use slated_schedule::overlap::{find_conflict, Interval};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Conflict checker backed by the appointment store. This is the
/// authoritative collaborator the interactive pre-check queries.
pub struct StoreConflictChecker {
    repo: Arc<dyn AppointmentRepository>,
    travel: Arc<dyn TravelTimeProvider>,
}

impl StoreConflictChecker {
    pub fn new(repo: Arc<dyn AppointmentRepository>, travel: Arc<dyn TravelTimeProvider>) -> Self {
        Self { repo, travel }
    }
}

#[async_trait]
impl ConflictChecker for StoreConflictChecker {
    async fn check(&self, request: &ConflictCheckRequest) -> Result<ConflictCheckResponse, BoxError> {
        // Trailing travel extends the proposal's own window before
        // comparison. A failed estimate counts as zero, never an error.
        let mut proposed_end = request.proposed_end;
        if let Some(address) = request.client_address.as_deref() {
            let travel_minutes = match self.travel.estimate(address, request.proposed_start).await {
                Ok(estimate) => estimate.minutes_or_zero(),
                Err(_) => 0,
            };
            proposed_end += Duration::minutes(travel_minutes);
        }
        let proposed = Interval::new(request.proposed_start, proposed_end);

        let appointments = self.repo.list_appointments().await?;
        let existing: Vec<Interval> = appointments
            .iter()
            .filter(|a| a.status.blocks_calendar())
            .map(Interval::from_appointment)
            .collect();

        match find_conflict(&proposed, &existing) {
            Some(taken) => {
                info!(
                    "Conflict: {} .. {} collides with {} .. {}",
                    proposed.start, proposed.end, taken.start, taken.end
                );
                Ok(ConflictCheckResponse {
                    is_valid: false,
                    conflict_message: Some(format!(
                        "requested time overlaps an existing appointment ({} to {})",
                        taken.start.format("%H:%M"),
                        taken.end.format("%H:%M")
                    )),
                })
            }
            None => Ok(ConflictCheckResponse {
                is_valid: true,
                conflict_message: None,
            }),
        }
    }
}
