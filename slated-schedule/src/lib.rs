pub mod duration;
pub mod lifecycle;
pub mod overlap;
pub mod selector;
pub mod validation;

pub use slated_shared::models::appointment::{Appointment, AppointmentStatus, ServiceLine};

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
