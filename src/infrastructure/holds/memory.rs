//! In-process hold store backed by `DashMap`
//!
//! Correct only inside one process. Expiry is checked lazily on every read;
//! the background sweeper merely reclaims memory.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, Hold, HoldKey, HoldOutcome, HoldStore, HoldSummary};

pub struct InMemoryHoldStore {
    holds: DashMap<HoldKey, Hold>,
}

impl InMemoryHoldStore {
    pub fn new() -> Self {
        Self {
            holds: DashMap::new(),
        }
    }

    /// Number of entries, expired ones included
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    pub(crate) fn try_hold_at(
        &self,
        key: HoldKey,
        customer_id: i32,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> DomainResult<HoldOutcome> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| DomainError::Validation(format!("hold ttl out of range: {:?}", ttl)))?;
        if ttl <= chrono::Duration::zero() {
            return Err(DomainError::Validation("hold ttl must be positive".into()));
        }
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            DomainError::Validation(format!("hold ttl of {}s overflows the clock", ttl.num_seconds()))
        })?;
        let fresh = Hold {
            customer_id,
            expires_at,
        };

        // The entry guard keeps the shard locked from the check to the insert.
        let outcome = match self.holds.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired_at(now) {
                    occupied.insert(fresh);
                    HoldOutcome {
                        granted: true,
                        expires_at: fresh.expires_at,
                    }
                } else {
                    HoldOutcome {
                        granted: false,
                        expires_at: occupied.get().expires_at,
                    }
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(fresh);
                HoldOutcome {
                    granted: true,
                    expires_at: fresh.expires_at,
                }
            }
        };

        let label = if outcome.granted { "granted" } else { "denied" };
        metrics::counter!("scheduling_holds_total", "outcome" => label).increment(1);
        debug!(
            center_id = key.center_id,
            date = %key.date,
            slot_id = key.slot_id,
            technician_id = key.technician_id,
            customer_id,
            outcome = label,
            "Hold attempt"
        );

        Ok(outcome)
    }

    pub(crate) fn release_at(&self, key: HoldKey, customer_id: i32, now: DateTime<Utc>) -> bool {
        self.holds
            .remove_if(&key, |_, hold| {
                hold.customer_id == customer_id && !hold.is_expired_at(now)
            })
            .is_some()
    }

    pub(crate) fn holder_at(&self, key: HoldKey, now: DateTime<Utc>) -> Option<Hold> {
        self.holds
            .get(&key)
            .map(|entry| *entry.value())
            .filter(|hold| !hold.is_expired_at(now))
    }

    pub(crate) fn holds_for_at(
        &self,
        center_id: i32,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<HoldSummary> {
        let mut holds: Vec<HoldSummary> = self
            .holds
            .iter()
            .filter(|entry| {
                let key = entry.key();
                key.center_id == center_id && key.date == date && !entry.value().is_expired_at(now)
            })
            .map(|entry| HoldSummary {
                technician_id: entry.key().technician_id,
                slot_id: entry.key().slot_id,
                customer_id: entry.value().customer_id,
                expires_at: entry.value().expires_at,
            })
            .collect();
        holds.sort_by_key(|h| (h.slot_id, h.technician_id));
        holds
    }

    pub(crate) fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.holds.len();
        self.holds.retain(|_, hold| !hold.is_expired_at(now));
        // Concurrent inserts can make `len` grow during retain.
        before.saturating_sub(self.holds.len())
    }
}

impl Default for InMemoryHoldStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HoldStore for InMemoryHoldStore {
    async fn try_hold(
        &self,
        key: HoldKey,
        customer_id: i32,
        ttl: Duration,
    ) -> DomainResult<HoldOutcome> {
        self.try_hold_at(key, customer_id, ttl, Utc::now())
    }

    async fn release(&self, key: HoldKey, customer_id: i32) -> DomainResult<bool> {
        Ok(self.release_at(key, customer_id, Utc::now()))
    }

    async fn is_held(&self, key: HoldKey) -> DomainResult<bool> {
        Ok(self.holder_at(key, Utc::now()).is_some())
    }

    async fn holder(&self, key: HoldKey) -> DomainResult<Option<Hold>> {
        Ok(self.holder_at(key, Utc::now()))
    }

    async fn holds_for(&self, center_id: i32, date: NaiveDate) -> DomainResult<Vec<HoldSummary>> {
        Ok(self.holds_for_at(center_id, date, Utc::now()))
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        Ok(self.purge_expired_at(Utc::now()))
    }
}
