//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod center_schedule_repository;
pub mod repository_provider;
pub mod service_offering_repository;
pub mod technician_repository;
pub mod technician_slot_repository;
pub mod time_slot_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}
