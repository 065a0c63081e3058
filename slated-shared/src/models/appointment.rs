use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    /// Start of service, in the provider's canonical timezone (UTC here).
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i64,
    /// Tacked onto the end of the occupied window, never the start.
    /// Zero when the appointment was created with travel disabled.
    pub travel_minutes: i64,
    /// Present only when travel applies.
    pub address: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// End of the occupied window: `scheduled_at + duration + travel`.
    /// The occupied interval is half-open, `[scheduled_at, occupied_end)`.
    pub fn occupied_end(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(self.duration_minutes + self.travel_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
}

impl AppointmentStatus {
    /// Whether an appointment in this status still blocks the calendar.
    pub fn blocks_calendar(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::Expired)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// One selected service on a booking form or create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub service_id: Uuid,
    pub duration_minutes: i64,
    pub quantity: u32,
}

impl ServiceLine {
    pub fn total_minutes(&self) -> i64 {
        self.duration_minutes * i64::from(self.quantity)
    }
}
