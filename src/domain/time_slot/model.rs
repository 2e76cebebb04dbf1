//! Time slot domain entity

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One fixed-length time-of-day slot in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i32,
    /// Start of the slot (time of day)
    pub slot_time: NaiveTime,
    /// Display label, e.g. "08:00-08:30"
    pub label: String,
    pub is_active: bool,
}

impl TimeSlot {
    pub fn ends_at(&self, slot_minutes: u32) -> NaiveTime {
        self.slot_time + Duration::minutes(i64::from(slot_minutes))
    }

    /// True when `self` starts exactly where `previous` ends.
    pub fn follows(&self, previous: &TimeSlot, slot_minutes: u32) -> bool {
        // NaiveTime addition wraps at midnight; a wrapped slot never follows.
        let prev_end = previous.ends_at(slot_minutes);
        prev_end > previous.slot_time && self.slot_time == prev_end
    }

    /// Whether the whole slot lies inside `[open, close]`.
    pub fn fits_within(&self, open: NaiveTime, close: NaiveTime, slot_minutes: u32) -> bool {
        let end = self.ends_at(slot_minutes);
        self.slot_time >= open && end > self.slot_time && end <= close
    }

    /// Default label for a slot starting at `start`: "HH:MM-HH:MM".
    pub fn default_label(start: NaiveTime, slot_minutes: u32) -> String {
        let end = start + Duration::minutes(i64::from(slot_minutes));
        format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimeSlotRequest {
    pub slot_time: NaiveTime,
    #[validate(length(min = 1, max = 50, message = "slot label must be 1-50 characters"))]
    pub label: String,
}

impl CreateTimeSlotRequest {
    pub fn new(slot_time: NaiveTime, label: impl Into<String>) -> Self {
        Self {
            slot_time,
            label: label.into(),
        }
    }
}
