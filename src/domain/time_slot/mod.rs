//! Slot catalog aggregate
//!
//! The system-wide ordered list of fixed-length time-of-day slots.

pub mod model;
pub mod repository;

pub use model::{CreateTimeSlotRequest, TimeSlot};
pub use repository::TimeSlotRepository;
