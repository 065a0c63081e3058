use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use slated_core::repository::AppointmentRepository;
use slated_schedule::lifecycle;
use slated_shared::models::appointment::{Appointment, AppointmentStatus};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// In-memory appointment store. Stands behind the repository trait where
/// the relational store sits in production; the write lock serializes
/// concurrent writes to the single provider's calendar.
#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, appointments: Vec<Appointment>) {
        let mut guard = self.appointments.write().await;
        for appointment in appointments {
            guard.insert(appointment.id, appointment);
        }
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, BoxError> {
        let guard = self.appointments.read().await;
        let mut all: Vec<Appointment> = guard.values().cloned().collect();
        all.sort_by_key(|a| (a.scheduled_at, a.id));
        Ok(all)
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, BoxError> {
        let guard = self.appointments.read().await;
        Ok(guard.get(&id).cloned())
    }

    async fn create_appointment(&self, appointment: &Appointment) -> Result<Uuid, BoxError> {
        let mut guard = self.appointments.write().await;
        guard.insert(appointment.id, appointment.clone());
        info!("Appointment created: {}", appointment.id);
        Ok(appointment.id)
    }

    async fn update_status(&self, id: Uuid, status: AppointmentStatus) -> Result<(), BoxError> {
        let mut guard = self.appointments.write().await;
        let appointment = guard
            .get_mut(&id)
            .ok_or_else(|| BoxError::from(format!("appointment not found: {}", id)))?;
        appointment.status = lifecycle::transition(appointment.status, status)?;
        appointment.updated_at = Utc::now();
        info!("Appointment {} moved to {}", id, status);
        Ok(())
    }

    async fn delete_appointment(&self, id: Uuid) -> Result<(), BoxError> {
        let mut guard = self.appointments.write().await;
        if guard.remove(&id).is_none() {
            return Err(format!("appointment not found: {}", id).into());
        }
        info!("Appointment deleted: {}", id);
        Ok(())
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<usize, BoxError> {
        let mut guard = self.appointments.write().await;
        let mut expired = 0;
        for appointment in guard.values_mut() {
            if appointment.status == AppointmentStatus::Pending && appointment.scheduled_at <= now {
                appointment.status = AppointmentStatus::Expired;
                appointment.updated_at = now;
                expired += 1;
            }
        }
        if expired > 0 {
            info!("Expired {} overdue pending appointments", expired);
        }
        Ok(expired)
    }
}
