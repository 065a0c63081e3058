use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

use slated_core::conflict::{ConflictCheckRequest, ConflictChecker};
use slated_shared::models::appointment::ServiceLine;

pub const UNABLE_TO_VALIDATE: &str = "unable to validate - please check manually";

/// Form state for a proposed appointment, as entered so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub client_id: Option<Uuid>,
    pub services: Vec<ServiceLine>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub travel_enabled: bool,
    pub address: Option<String>,
}

impl AppointmentDraft {
    pub fn total_service_minutes(&self) -> i64 {
        self.services.iter().map(ServiceLine::total_minutes).sum()
    }

    /// Required fields before a pre-check is even attempted: client,
    /// at least one service, a date, and an address when travel is on.
    fn is_complete(&self) -> bool {
        self.client_id.is_some()
            && !self.services.is_empty()
            && self.scheduled_at.is_some()
            && (!self.travel_enabled
                || self
                    .address
                    .as_deref()
                    .map_or(false, |a| !a.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationState {
    Idle,
    Validating,
    Valid,
    Invalid { message: String },
    Error { message: String },
}

/// Snapshot handed to the UI layer. `is_valid: None` means "not yet
/// evaluated", distinct from an explicit verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_validating: bool,
    pub is_valid: Option<bool>,
    pub conflict_message: Option<String>,
}

impl ValidationState {
    pub fn snapshot(&self) -> ValidationResult {
        match self {
            ValidationState::Idle => ValidationResult {
                is_validating: false,
                is_valid: None,
                conflict_message: None,
            },
            ValidationState::Validating => ValidationResult {
                is_validating: true,
                is_valid: None,
                conflict_message: None,
            },
            ValidationState::Valid => ValidationResult {
                is_validating: false,
                is_valid: Some(true),
                conflict_message: None,
            },
            ValidationState::Invalid { message } => ValidationResult {
                is_validating: false,
                is_valid: Some(false),
                conflict_message: Some(message.clone()),
            },
            ValidationState::Error { message } => ValidationResult {
                is_validating: false,
                is_valid: None,
                conflict_message: Some(message.clone()),
            },
        }
    }
}

struct Tracked {
    ticket: u64,
    state: ValidationState,
}

/// Async shell around the interactive conflict pre-check.
///
/// Holds only a monotonically increasing request sequence; each new attempt
/// supersedes any still in flight, so a late response can never overwrite a
/// newer state.
pub struct ScheduleValidator {
    checker: Arc<dyn ConflictChecker>,
    call_timeout: Duration,
    seq: AtomicU64,
    tracked: Mutex<Tracked>,
}

impl ScheduleValidator {
    pub fn new(checker: Arc<dyn ConflictChecker>, call_timeout: Duration) -> Self {
        Self {
            checker,
            call_timeout,
            seq: AtomicU64::new(0),
            tracked: Mutex::new(Tracked {
                ticket: 0,
                state: ValidationState::Idle,
            }),
        }
    }

    /// Latest visible state.
    pub async fn current(&self) -> ValidationResult {
        self.tracked.lock().await.state.snapshot()
    }

    /// Drop any in-flight attempt and go back to Idle.
    pub async fn reset(&self) {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut tracked = self.tracked.lock().await;
        tracked.ticket = ticket;
        tracked.state = ValidationState::Idle;
    }

    /// Run the conflict pre-check for the draft as it stands.
    ///
    /// Skipped entirely while the travel toggle is off or required fields
    /// are missing; the server stays the final arbiter at submission either
    /// way, so a remote failure here is a soft warning, not a block.
    pub async fn validate(&self, draft: &AppointmentDraft) -> ValidationResult {
        if !draft.travel_enabled || !draft.is_complete() {
            self.reset().await;
            return self.current().await;
        }
        let Some(proposed_start) = draft.scheduled_at else {
            self.reset().await;
            return self.current().await;
        };

        let ticket = {
            let mut tracked = self.tracked.lock().await;
            let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            tracked.ticket = ticket;
            tracked.state = ValidationState::Validating;
            ticket
        };

        let proposed_end =
            proposed_start + chrono::Duration::minutes(draft.total_service_minutes());
        let request = ConflictCheckRequest {
            proposed_start,
            proposed_end,
            client_address: draft.address.clone(),
        };

        let outcome = match timeout(self.call_timeout, self.checker.check(&request)).await {
            Ok(Ok(response)) if response.is_valid => ValidationState::Valid,
            Ok(Ok(response)) => ValidationState::Invalid {
                message: response
                    .conflict_message
                    .unwrap_or_else(|| "requested time is no longer available".to_string()),
            },
            Ok(Err(err)) => {
                warn!("Conflict pre-check failed: {}", err);
                ValidationState::Error {
                    message: UNABLE_TO_VALIDATE.to_string(),
                }
            }
            Err(_) => {
                warn!("Conflict pre-check timed out after {:?}", self.call_timeout);
                ValidationState::Error {
                    message: UNABLE_TO_VALIDATE.to_string(),
                }
            }
        };

        let mut tracked = self.tracked.lock().await;
        if tracked.ticket == ticket {
            tracked.state = outcome;
        } else {
            debug!(
                "Discarding superseded validation result (ticket {}, latest {})",
                ticket, tracked.ticket
            );
        }
        tracked.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use slated_core::conflict::ConflictCheckResponse;
    use std::sync::atomic::AtomicUsize;

    struct StubChecker {
        calls: AtomicUsize,
        is_valid: bool,
        message: Option<String>,
        delay: Duration,
    }

    impl StubChecker {
        fn valid() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                is_valid: true,
                message: None,
                delay: Duration::ZERO,
            }
        }

        fn conflicting(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                is_valid: false,
                message: Some(message.to_string()),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl ConflictChecker for StubChecker {
        async fn check(
            &self,
            _request: &ConflictCheckRequest,
        ) -> Result<ConflictCheckResponse, Box<dyn std::error::Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(ConflictCheckResponse {
                is_valid: self.is_valid,
                conflict_message: self.message.clone(),
            })
        }
    }

    struct FailingChecker;

    #[async_trait]
    impl ConflictChecker for FailingChecker {
        async fn check(
            &self,
            _request: &ConflictCheckRequest,
        ) -> Result<ConflictCheckResponse, Box<dyn std::error::Error + Send + Sync>> {
            Err("remote unavailable".into())
        }
    }

    /// Responds slowly with a conflict for "slow" addresses, instantly
    /// valid otherwise. Lets tests race two requests deterministically.
    struct AddressKeyedChecker;

    #[async_trait]
    impl ConflictChecker for AddressKeyedChecker {
        async fn check(
            &self,
            request: &ConflictCheckRequest,
        ) -> Result<ConflictCheckResponse, Box<dyn std::error::Error + Send + Sync>> {
            let slow = request
                .client_address
                .as_deref()
                .map_or(false, |a| a.contains("slow"));
            if slow {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(ConflictCheckResponse {
                    is_valid: false,
                    conflict_message: Some("stale conflict".to_string()),
                })
            } else {
                Ok(ConflictCheckResponse {
                    is_valid: true,
                    conflict_message: None,
                })
            }
        }
    }

    fn draft() -> AppointmentDraft {
        AppointmentDraft {
            client_id: Some(Uuid::new_v4()),
            services: vec![ServiceLine {
                service_id: Uuid::new_v4(),
                duration_minutes: 60,
                quantity: 1,
            }],
            scheduled_at: Some(Utc.with_ymd_and_hms(2026, 3, 10, 15, 0, 0).unwrap()),
            travel_enabled: true,
            address: Some("12 Elm St".to_string()),
        }
    }

    #[tokio::test]
    async fn test_valid_draft_reports_valid() {
        let validator = ScheduleValidator::new(
            Arc::new(StubChecker::valid()),
            Duration::from_millis(500),
        );
        let result = validator.validate(&draft()).await;
        assert!(!result.is_validating);
        assert_eq!(result.is_valid, Some(true));
        assert!(result.conflict_message.is_none());
    }

    #[tokio::test]
    async fn test_conflict_reports_invalid_with_message() {
        let validator = ScheduleValidator::new(
            Arc::new(StubChecker::conflicting("already booked 15:00-16:00")),
            Duration::from_millis(500),
        );
        let result = validator.validate(&draft()).await;
        assert_eq!(result.is_valid, Some(false));
        assert_eq!(
            result.conflict_message.as_deref(),
            Some("already booked 15:00-16:00")
        );
    }

    #[tokio::test]
    async fn test_travel_disabled_stays_idle_without_calling_remote() {
        let checker = Arc::new(StubChecker::valid());
        let validator = ScheduleValidator::new(checker.clone(), Duration::from_millis(500));

        let mut no_travel = draft();
        no_travel.travel_enabled = false;
        no_travel.address = None;

        let result = validator.validate(&no_travel).await;
        assert!(!result.is_validating);
        assert_eq!(result.is_valid, None);
        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_incomplete_draft_stays_idle() {
        let checker = Arc::new(StubChecker::valid());
        let validator = ScheduleValidator::new(checker.clone(), Duration::from_millis(500));

        let mut missing_client = draft();
        missing_client.client_id = None;
        assert_eq!(validator.validate(&missing_client).await.is_valid, None);

        let mut missing_address = draft();
        missing_address.address = Some("   ".to_string());
        assert_eq!(validator.validate(&missing_address).await.is_valid, None);

        let mut no_services = draft();
        no_services.services.clear();
        assert_eq!(validator.validate(&no_services).await.is_valid, None);

        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_soft_error() {
        let validator =
            ScheduleValidator::new(Arc::new(FailingChecker), Duration::from_millis(500));
        let result = validator.validate(&draft()).await;
        assert!(!result.is_validating);
        assert_eq!(result.is_valid, None);
        assert_eq!(result.conflict_message.as_deref(), Some(UNABLE_TO_VALIDATE));
    }

    #[tokio::test]
    async fn test_slow_remote_times_out_into_error() {
        let checker = StubChecker {
            calls: AtomicUsize::new(0),
            is_valid: true,
            message: None,
            delay: Duration::from_millis(200),
        };
        let validator = ScheduleValidator::new(Arc::new(checker), Duration::from_millis(10));
        let result = validator.validate(&draft()).await;
        assert_eq!(result.is_valid, None);
        assert_eq!(result.conflict_message.as_deref(), Some(UNABLE_TO_VALIDATE));
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let validator = Arc::new(ScheduleValidator::new(
            Arc::new(AddressKeyedChecker),
            Duration::from_secs(1),
        ));

        let mut first = draft();
        first.address = Some("99 slow lane".to_string());
        let mut second = draft();
        second.address = Some("12 Elm St".to_string());

        let slow_validator = validator.clone();
        let slow = tokio::spawn(async move { slow_validator.validate(&first).await });

        // Let the slow request get in flight, then supersede it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fresh = validator.validate(&second).await;
        assert_eq!(fresh.is_valid, Some(true));

        // The late conflict response must not surface.
        let late = slow.await.unwrap();
        assert_eq!(late.is_valid, Some(true));
        assert_eq!(validator.current().await.is_valid, Some(true));
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle() {
        let validator = ScheduleValidator::new(
            Arc::new(StubChecker::valid()),
            Duration::from_millis(500),
        );
        validator.validate(&draft()).await;
        validator.reset().await;
        let result = validator.current().await;
        assert!(!result.is_validating);
        assert_eq!(result.is_valid, None);
    }
}
