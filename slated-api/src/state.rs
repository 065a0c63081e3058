use std::sync::Arc;

use slated_core::conflict::ConflictChecker;
use slated_core::repository::AppointmentRepository;
use slated_schedule::validation::ScheduleValidator;
use slated_store::app_config::BusinessRules;
use slated_store::invalidation::InvalidationBus;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn AppointmentRepository>,
    pub checker: Arc<dyn ConflictChecker>,
    pub validator: Arc<ScheduleValidator>,
    pub bus: InvalidationBus,
    pub business_rules: BusinessRules,
}
