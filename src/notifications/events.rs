//! Notification events
//!
//! Everything the scheduling services announce after a state change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::BookingStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A hold was granted on one calendar slot
    SlotHeld(SlotHeldEvent),
    /// A hold was released by its owner
    HoldReleased(HoldReleasedEvent),
    /// A booking was committed together with its slot span
    BookingCreated(BookingCreatedEvent),
    BookingStatusChanged(BookingStatusChangedEvent),
    /// Calendar rows went back to the free pool
    SlotsReleased(SlotsReleasedEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::SlotHeld(_) => "slot_held",
            Event::HoldReleased(_) => "hold_released",
            Event::BookingCreated(_) => "booking_created",
            Event::BookingStatusChanged(_) => "booking_status_changed",
            Event::SlotsReleased(_) => "slots_released",
        }
    }

    /// Center the event concerns, when known
    pub fn center_id(&self) -> i32 {
        match self {
            Event::SlotHeld(e) => e.center_id,
            Event::HoldReleased(e) => e.center_id,
            Event::BookingCreated(e) => e.center_id,
            Event::BookingStatusChanged(e) => e.center_id,
            Event::SlotsReleased(e) => e.center_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotHeldEvent {
    pub center_id: i32,
    pub date: NaiveDate,
    pub technician_id: i32,
    pub slot_ids: Vec<i32>,
    pub customer_id: i32,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldReleasedEvent {
    pub center_id: i32,
    pub date: NaiveDate,
    pub technician_id: i32,
    pub slot_ids: Vec<i32>,
    pub customer_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreatedEvent {
    pub booking_id: i32,
    pub customer_id: i32,
    pub center_id: i32,
    pub technician_id: i32,
    pub booking_date: NaiveDate,
    pub slot_ids: Vec<i32>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusChangedEvent {
    pub booking_id: i32,
    pub center_id: i32,
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsReleasedEvent {
    pub center_id: i32,
    pub technician_id: i32,
    pub work_date: NaiveDate,
    pub slot_ids: Vec<i32>,
    pub booking_id: Option<i32>,
}

/// Envelope delivered to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_type_tag() {
        let message = EventMessage::new(Event::BookingStatusChanged(BookingStatusChangedEvent {
            booking_id: 9,
            center_id: 1,
            from: BookingStatus::Pending,
            to: BookingStatus::Confirmed,
            timestamp: Utc::now(),
        }));

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "BookingStatusChanged");
        assert_eq!(json["data"]["from"], "PENDING");
        assert_eq!(json["data"]["to"], "CONFIRMED");
        assert!(json["id"].as_str().is_some());
    }

    #[test]
    fn slot_release_carries_its_center() {
        let event = Event::SlotsReleased(SlotsReleasedEvent {
            center_id: 2,
            technician_id: 7,
            work_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            slot_ids: vec![3],
            booking_id: None,
        });
        assert_eq!(event.event_type(), "slots_released");
        assert_eq!(event.center_id(), 2);
    }
}
