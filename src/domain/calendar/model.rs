//! Technician time slot entity and its derived status

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status of a calendar row, computed from its stored fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Free, whether or not it was assigned before
    Available,
    /// Blocked administratively, no booking attached
    Reserved,
    /// Occupied by a booking
    Assigned,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Assigned => "Assigned",
        }
    }

    /// Whether a booking may claim a row in this status
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Whether an explicit release is a legal transition from this status
    pub fn is_releasable(&self) -> bool {
        matches!(self, Self::Assigned | Self::Reserved)
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianTimeSlot {
    pub id: i32,
    pub technician_id: i32,
    pub work_date: NaiveDate,
    pub slot_id: i32,
    pub is_available: bool,
    pub booking_id: Option<i32>,
    pub note: Option<String>,
    /// Set on every release. History only, it never affects the status.
    pub released_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TechnicianTimeSlot {
    pub fn status(&self) -> SlotStatus {
        match (self.is_available, self.booking_id) {
            (false, Some(_)) => SlotStatus::Assigned,
            (false, None) => SlotStatus::Reserved,
            (true, _) => SlotStatus::Available,
        }
    }

    /// Whether the row has been freed at least once
    pub fn was_released(&self) -> bool {
        self.released_at.is_some()
    }
}

/// Contiguous run of slots one technician must cover for a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpan {
    pub technician_id: i32,
    pub work_date: NaiveDate,
    /// Slot IDs in time order
    pub slot_ids: Vec<i32>,
}

impl SlotSpan {
    pub fn start_slot_id(&self) -> Option<i32> {
        self.slot_ids.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_available: bool, booking_id: Option<i32>, released: bool) -> TechnicianTimeSlot {
        TechnicianTimeSlot {
            id: 1,
            technician_id: 7,
            work_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            slot_id: 3,
            is_available,
            booking_id,
            note: None,
            released_at: released.then(Utc::now),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_is_derived_from_flag_and_booking() {
        assert_eq!(row(true, None, false).status(), SlotStatus::Available);
        assert_eq!(row(false, None, false).status(), SlotStatus::Reserved);
        assert_eq!(row(false, Some(12), false).status(), SlotStatus::Assigned);
    }

    #[test]
    fn freed_row_is_available_again_and_keeps_history() {
        let freed = row(true, None, true);
        assert_eq!(freed.status(), SlotStatus::Available);
        assert!(freed.was_released());
        assert!(!row(true, None, false).was_released());
    }

    #[test]
    fn reassigned_row_reports_assigned_despite_history() {
        assert_eq!(row(false, Some(13), true).status(), SlotStatus::Assigned);
    }

    #[test]
    fn only_free_rows_are_assignable() {
        assert!(SlotStatus::Available.is_assignable());
        assert!(!SlotStatus::Reserved.is_assignable());
        assert!(!SlotStatus::Assigned.is_assignable());
    }

    #[test]
    fn only_occupied_rows_are_releasable() {
        assert!(SlotStatus::Assigned.is_releasable());
        assert!(SlotStatus::Reserved.is_releasable());
        assert!(!SlotStatus::Available.is_releasable());
    }
}
