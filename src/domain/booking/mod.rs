//! Booking aggregate
//!
//! Contains the Booking entity, its status lifecycle, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, CreateBookingRequest, NewBooking};
pub use repository::{BookingRepository, SpanCommit};
