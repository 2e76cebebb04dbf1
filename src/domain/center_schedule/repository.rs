//! Center schedule repository interface

use async_trait::async_trait;

use super::model::CenterSchedule;
use crate::domain::DomainResult;

#[async_trait]
pub trait CenterScheduleRepository: Send + Sync {
    /// All schedule rows of a center, any weekday and status
    async fn find_for_center(&self, center_id: i32) -> DomainResult<Vec<CenterSchedule>>;

    /// Insert a schedule row; the returned value carries the assigned ID
    async fn create(&self, schedule: CenterSchedule) -> DomainResult<CenterSchedule>;
}
