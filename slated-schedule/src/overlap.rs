use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use slated_shared::models::appointment::Appointment;

/// Half-open occupied window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Blocking window of an existing appointment, trailing travel included.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            start: appointment.scheduled_at,
            end: appointment.occupied_end(),
        }
    }

    /// Half-open overlap: an interval ending exactly when another starts
    /// does not conflict.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// First existing interval the proposal collides with, in input order.
///
/// A zero-length proposal occupies nothing and never conflicts; the guard
/// makes that explicit rather than relying on the comparison degenerating.
pub fn find_conflict(proposed: &Interval, existing: &[Interval]) -> Option<Interval> {
    if proposed.start >= proposed.end {
        return None;
    }
    existing
        .iter()
        .copied()
        .find(|candidate| proposed.overlaps(candidate))
}
