//! Hold store interface
//!
//! Implemented in-process today; a key-value store with atomic
//! set-if-absent-with-expiry can stand behind the same trait.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Hold, HoldKey, HoldOutcome, HoldSummary};
use crate::domain::DomainResult;

#[async_trait]
pub trait HoldStore: Send + Sync {
    /// Grant the hold only if no unexpired hold exists for `key`.
    /// Check and insert are one atomic step.
    async fn try_hold(
        &self,
        key: HoldKey,
        customer_id: i32,
        ttl: Duration,
    ) -> DomainResult<HoldOutcome>;

    /// Remove the hold only if `customer_id` currently owns it and it has not expired
    async fn release(&self, key: HoldKey, customer_id: i32) -> DomainResult<bool>;

    /// True only while an unexpired hold exists for `key`
    async fn is_held(&self, key: HoldKey) -> DomainResult<bool>;

    /// The unexpired hold on `key`, if any
    async fn holder(&self, key: HoldKey) -> DomainResult<Option<Hold>>;

    /// Unexpired holds of one center on one date
    async fn holds_for(&self, center_id: i32, date: NaiveDate) -> DomainResult<Vec<HoldSummary>>;

    /// Drop expired entries. Returns how many were removed.
    async fn purge_expired(&self) -> DomainResult<usize>;
}
