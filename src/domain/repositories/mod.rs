//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::booking::BookingRepository;
use super::calendar::TechnicianSlotRepository;
use super::center_schedule::CenterScheduleRepository;
use super::service_offering::ServiceOfferingRepository;
use super::technician::TechnicianRepository;
use super::time_slot::TimeSlotRepository;
use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let slots = repos.time_slots().list(true).await?;
///     let booking = repos.bookings().find_by_id(42).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn time_slots(&self) -> &dyn TimeSlotRepository;
    fn center_schedules(&self) -> &dyn CenterScheduleRepository;
    fn technicians(&self) -> &dyn TechnicianRepository;
    fn service_offerings(&self) -> &dyn ServiceOfferingRepository;
    fn calendar(&self) -> &dyn TechnicianSlotRepository;
    fn bookings(&self) -> &dyn BookingRepository;
}
