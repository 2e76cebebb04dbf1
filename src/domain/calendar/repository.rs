//! Technician slot calendar repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::TechnicianTimeSlot;
use crate::domain::DomainResult;

#[async_trait]
pub trait TechnicianSlotRepository: Send + Sync {
    /// Insert Available rows for any of `slot_ids` the technician does not
    /// have yet on `work_date`. Returns the number of rows created.
    async fn generate_day(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_ids: &[i32],
    ) -> DomainResult<usize>;

    async fn find(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
    ) -> DomainResult<Option<TechnicianTimeSlot>>;

    /// Every row of the given technicians on one date
    async fn find_for_technicians(
        &self,
        technician_ids: &[i32],
        work_date: NaiveDate,
    ) -> DomainResult<Vec<TechnicianTimeSlot>>;

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<TechnicianTimeSlot>>;

    /// Claim the row only if it is still free (available and no booking).
    ///
    /// Returns false when no free row matched, either because the row is
    /// occupied or because it does not exist.
    async fn reserve(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        booking_id: Option<i32>,
        note: Option<&str>,
    ) -> DomainResult<bool>;

    /// Free the row only if it is still occupied by `expected_booking_id`
    /// (`None` = administrative block). Returns false when the row changed
    /// underneath the caller.
    async fn release(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        expected_booking_id: Option<i32>,
    ) -> DomainResult<bool>;
}
