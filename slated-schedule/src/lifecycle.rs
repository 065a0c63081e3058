use slated_shared::models::appointment::AppointmentStatus;

use crate::ScheduleError;

/// Allowed status transitions for a single appointment. Cancelled and
/// expired are terminal.
pub fn transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<AppointmentStatus, ScheduleError> {
    use AppointmentStatus::*;

    let allowed = matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Pending, Expired)
            | (Confirmed, Cancelled)
            | (Confirmed, Expired)
    );

    if allowed {
        Ok(to)
    } else {
        Err(ScheduleError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn test_confirm_flow() {
        assert_eq!(transition(Pending, Confirmed).unwrap(), Confirmed);
        assert_eq!(transition(Confirmed, Cancelled).unwrap(), Cancelled);
    }

    #[test]
    fn test_terminal_states_stay_terminal() {
        assert!(transition(Cancelled, Confirmed).is_err());
        assert!(transition(Expired, Pending).is_err());
        assert!(transition(Expired, Confirmed).is_err());
    }

    #[test]
    fn test_no_unconfirm() {
        assert!(transition(Confirmed, Pending).is_err());
    }
}
