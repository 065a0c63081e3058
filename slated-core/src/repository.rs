use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use slated_shared::models::appointment::{Appointment, AppointmentStatus};

/// Repository trait for appointment data access. The backing store is
/// external to this engine and serializes concurrent writes to a single
/// provider's calendar.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn list_appointments(
        &self,
    ) -> Result<Vec<Appointment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_appointment(
        &self,
        id: Uuid,
    ) -> Result<Option<Appointment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_appointment(
        &self,
        appointment: &Appointment,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_appointment(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Mark pending appointments whose start has passed as expired.
    /// Returns how many were flipped.
    async fn expire_overdue(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
