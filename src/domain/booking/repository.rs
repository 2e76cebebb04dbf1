//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingStatus, NewBooking};
use crate::domain::calendar::SlotSpan;
use crate::domain::DomainResult;

/// Result of committing a booking together with its slot span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanCommit {
    Committed(Booking),
    /// A slot of the span was no longer free; nothing was written
    SlotTaken { slot_id: i32 },
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert the booking as PENDING and claim every slot of `span` for it
    /// in one transaction. Rolled back entirely if any slot is not free.
    async fn create_with_span(&self, booking: NewBooking, span: &SlotSpan)
        -> DomainResult<SpanCommit>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    async fn find_for_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>>;

    /// Move the booking from `from` to `to`.
    /// Returns `None` if its status is no longer `from`.
    async fn update_status(
        &self,
        id: i32,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<Option<Booking>>;

    /// Mark the booking CANCELLED and free every calendar row it holds,
    /// in one transaction. Returns `None` if its status is no longer `from`;
    /// otherwise the cancelled booking and the released slot IDs.
    async fn cancel(
        &self,
        id: i32,
        from: BookingStatus,
    ) -> DomainResult<Option<(Booking, Vec<i32>)>>;
}
