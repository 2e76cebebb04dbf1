//! Service offering repository interface

use async_trait::async_trait;

use super::model::ServiceOffering;
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceOfferingRepository: Send + Sync {
    /// Offerings for the given IDs, skill requirements included.
    /// Unknown IDs are simply absent from the result.
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<ServiceOffering>>;

    /// Insert an offering with its requirements; the returned value carries the assigned ID
    async fn create(&self, offering: ServiceOffering) -> DomainResult<ServiceOffering>;
}
