//! # Center Scheduling
//!
//! Appointment scheduling for multi-center service businesses: a shared
//! catalog of fixed-length time slots, per-technician daily calendars,
//! short-lived reservation holds, and bookings that claim a contiguous
//! run of slots atomically.
//!
//! ## Architecture
//!
//! - **domain**: entities, derived slot state and repository traits
//! - **application**: availability, booking and catalog services
//! - **infrastructure**: SeaORM persistence and the in-process hold store
//! - **notifications**: event bus for committed state changes
//! - **support**: errors and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod support;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, AppConfig, SchedulingConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryHoldStore, SeaOrmRepositoryProvider};

pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
