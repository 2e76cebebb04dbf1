//! Time slot repository interface

use async_trait::async_trait;
use chrono::NaiveTime;

use super::model::TimeSlot;
use crate::domain::DomainResult;

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    /// Insert a new slot; the returned value carries the assigned ID
    async fn create(&self, slot_time: NaiveTime, label: &str) -> DomainResult<TimeSlot>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<TimeSlot>>;

    async fn find_by_time(&self, slot_time: NaiveTime) -> DomainResult<Option<TimeSlot>>;

    async fn find_by_label(&self, label: &str) -> DomainResult<Option<TimeSlot>>;

    /// All slots ordered by time of day
    async fn list(&self, active_only: bool) -> DomainResult<Vec<TimeSlot>>;

    /// Retire or re-activate a slot. Returns false when the ID is unknown.
    async fn set_active(&self, id: i32, is_active: bool) -> DomainResult<bool>;
}
