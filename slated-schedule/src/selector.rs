use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use slated_shared::models::appointment::{Appointment, AppointmentStatus};

/// Minutes before start during which an appointment already counts as
/// "current".
pub const DEFAULT_GRACE_MINUTES: i64 = 10;

/// Derived view over the appointment set at an instant. Never persisted;
/// recomputed from scratch on every read.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemporalSelection {
    pub current: Option<Appointment>,
    pub next: Option<Appointment>,
}

pub fn select(now: DateTime<Utc>, appointments: &[Appointment]) -> TemporalSelection {
    select_with_grace(now, appointments, DEFAULT_GRACE_MINUTES)
}

/// Pick the current and next appointment as of `now`.
///
/// Only confirmed appointments are eligible. Current means the window
/// `[scheduled_at - grace, occupied_end]` contains `now`; with multiple
/// candidates the earliest start wins. Next is the earliest confirmed start
/// strictly after `now` that is not the current one, ties broken by id.
pub fn select_with_grace(
    now: DateTime<Utc>,
    appointments: &[Appointment],
    grace_minutes: i64,
) -> TemporalSelection {
    let grace = Duration::minutes(grace_minutes);

    let confirmed: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Confirmed)
        .collect();

    let current = confirmed
        .iter()
        .copied()
        .filter(|a| now >= a.scheduled_at - grace && now <= a.occupied_end())
        .min_by_key(|a| a.scheduled_at)
        .cloned();

    let next = confirmed
        .iter()
        .copied()
        .filter(|a| a.scheduled_at > now)
        .filter(|a| current.as_ref().map_or(true, |c| c.id != a.id))
        .min_by_key(|a| (a.scheduled_at, a.id))
        .cloned();

    TemporalSelection { current, next }
}
