//! Technician repository interface

use async_trait::async_trait;

use super::model::Technician;
use crate::domain::DomainResult;

#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    /// Active technicians of a center, skills included
    async fn find_active_for_center(&self, center_id: i32) -> DomainResult<Vec<Technician>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Technician>>;

    /// Insert a technician with skills; the returned value carries the assigned ID
    async fn create(&self, technician: Technician) -> DomainResult<Technician>;
}
