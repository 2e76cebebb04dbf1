//! Hold value types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoldKey {
    pub center_id: i32,
    pub date: NaiveDate,
    pub slot_id: i32,
    pub technician_id: i32,
}

impl HoldKey {
    pub fn new(center_id: i32, date: NaiveDate, slot_id: i32, technician_id: i32) -> Self {
        Self {
            center_id,
            date,
            slot_id,
            technician_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hold {
    pub customer_id: i32,
    pub expires_at: DateTime<Utc>,
}

impl Hold {
    /// A hold is dead from its expiry instant onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Answer to a hold attempt. A refusal is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoldOutcome {
    pub granted: bool,
    /// Expiry of the new hold when granted, of the blocking hold otherwise
    pub expires_at: DateTime<Utc>,
}

/// Administrative view of one live hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoldSummary {
    pub technician_id: i32,
    pub slot_id: i32,
    pub customer_id: i32,
    pub expires_at: DateTime<Utc>,
}
