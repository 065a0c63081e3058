use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{error, info};
use uuid::Uuid;

use slated_core::repository::AppointmentRepository;
use slated_schedule::selector::select_with_grace;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Periodic schedule tick: expire overdue pendings and re-derive the
/// current/next window. The selector is pure, so a fresh read plus a
/// recompute is all that happens here.
pub async fn start_schedule_ticker(
    repo: Arc<dyn AppointmentRepository>,
    grace_minutes: i64,
    tick_seconds: u64,
) {
    let mut tick = interval(Duration::from_secs(tick_seconds.max(1)));
    let mut last_window: (Option<Uuid>, Option<Uuid>) = (None, None);

    info!("Schedule ticker started ({}s interval)", tick_seconds);

    loop {
        tick.tick().await;
        if let Err(e) = run_tick(&repo, grace_minutes, &mut last_window).await {
            error!("Schedule tick failed: {}", e);
        }
    }
}

async fn run_tick(
    repo: &Arc<dyn AppointmentRepository>,
    grace_minutes: i64,
    last_window: &mut (Option<Uuid>, Option<Uuid>),
) -> Result<(), BoxError> {
    let now = chrono::Utc::now();
    repo.expire_overdue(now).await?;

    let appointments = repo.list_appointments().await?;
    let selection = select_with_grace(now, &appointments, grace_minutes);
    let window = (
        selection.current.as_ref().map(|a| a.id),
        selection.next.as_ref().map(|a| a.id),
    );

    if window != *last_window {
        info!(
            "Schedule window moved: current={:?} next={:?}",
            window.0, window.1
        );
        *last_window = window;
    }

    Ok(())
}
