//! Infrastructure layer - external concerns

pub mod database;
pub mod holds;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use holds::InMemoryHoldStore;
