pub mod appointment;
pub mod events;
