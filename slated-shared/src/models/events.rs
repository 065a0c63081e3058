use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

/// Cached query scopes that list appointments in some form. Any mutation
/// makes all of them stale; consumers refetch rather than patch.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryScope {
    AllAppointments,
    Today,
    Pending,
    DashboardSummary,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct InvalidationEvent {
    pub appointment_id: Uuid,
    pub kind: MutationKind,
    pub occurred_at: i64,
}

impl InvalidationEvent {
    pub fn new(appointment_id: Uuid, kind: MutationKind) -> Self {
        Self {
            appointment_id,
            kind,
            occurred_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn stale_scopes(&self) -> &'static [QueryScope] {
        &[
            QueryScope::AllAppointments,
            QueryScope::Today,
            QueryScope::Pending,
            QueryScope::DashboardSummary,
        ]
    }
}
