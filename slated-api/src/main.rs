use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use slated_api::{app, AppState};
use slated_core::conflict::ConflictChecker;
use slated_core::repository::AppointmentRepository;
use slated_core::travel::FixedTravelTimeProvider;
use slated_schedule::validation::ScheduleValidator;
use slated_store::{InMemoryAppointmentRepository, InvalidationBus, StoreConflictChecker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slated_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = slated_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Slated API on port {}", config.server.port);

    let repo: Arc<dyn AppointmentRepository> = Arc::new(InMemoryAppointmentRepository::new());

    let travel = Arc::new(FixedTravelTimeProvider {
        minutes: config.business_rules.fallback_travel_minutes,
    });
    let checker: Arc<dyn ConflictChecker> =
        Arc::new(StoreConflictChecker::new(repo.clone(), travel));

    let validator = Arc::new(ScheduleValidator::new(
        checker.clone(),
        Duration::from_millis(config.business_rules.validation_timeout_ms),
    ));

    let bus = InvalidationBus::new(100);

    tokio::spawn(slated_api::worker::start_schedule_ticker(
        repo.clone(),
        config.business_rules.grace_period_minutes,
        config.business_rules.tick_interval_seconds,
    ));

    let app_state = AppState {
        repo,
        checker,
        validator,
        bus,
        business_rules: config.business_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
