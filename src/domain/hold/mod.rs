//! Reservation holds
//!
//! Short-lived, advisory, in-process claims on one (center, date, slot,
//! technician) tuple. Holds never replace the calendar's durable check.

pub mod model;
pub mod store;

pub use model::{Hold, HoldKey, HoldOutcome, HoldSummary};
pub use store::HoldStore;
