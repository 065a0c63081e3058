use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire shape of the conflict pre-check sent to the store/service side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    pub proposed_start: DateTime<Utc>,
    pub proposed_end: DateTime<Utc>,
    pub client_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub is_valid: bool,
    pub conflict_message: Option<String>,
}

/// External collaborator that decides whether a proposed window is free.
/// The engine treats its answer as advisory; the server remains the final
/// arbiter at submission time.
#[async_trait]
pub trait ConflictChecker: Send + Sync {
    async fn check(
        &self,
        request: &ConflictCheckRequest,
    ) -> Result<ConflictCheckResponse, Box<dyn std::error::Error + Send + Sync>>;
}
