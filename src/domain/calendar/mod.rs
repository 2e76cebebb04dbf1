//! Technician slot calendar
//!
//! One row per (technician, date, slot). The row is the single source of
//! truth for whether a technician can take work in that slot.

pub mod model;
pub mod repository;

pub use model::{SlotSpan, SlotStatus, TechnicianTimeSlot};
pub use repository::TechnicianSlotRepository;
