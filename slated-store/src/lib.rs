pub mod app_config;
pub mod conflict_checker;
pub mod invalidation;
pub mod memory_repo;

pub use conflict_checker::StoreConflictChecker;
pub use invalidation::InvalidationBus;
pub use memory_repo::InMemoryAppointmentRepository;
