//! Domain layer: scheduling entities, derived state and the traits the
//! application layer depends on.

pub mod booking;
pub mod calendar;
pub mod center_schedule;
pub mod hold;
pub mod repositories;
pub mod service_offering;
pub mod technician;
pub mod time_slot;

pub use booking::{Booking, BookingRepository, BookingStatus, CreateBookingRequest, NewBooking, SpanCommit};
pub use calendar::{SlotSpan, SlotStatus, TechnicianSlotRepository, TechnicianTimeSlot};
pub use center_schedule::{CenterSchedule, CenterScheduleRepository, OperatingWindow};
pub use hold::{Hold, HoldKey, HoldOutcome, HoldStore, HoldSummary};
pub use repositories::{DomainResult, RepositoryProvider};
pub use service_offering::{ServiceOffering, ServiceOfferingRepository, SkillRequirement};
pub use technician::{Technician, TechnicianRepository, TechnicianSkill};
pub use time_slot::{CreateTimeSlotRequest, TimeSlot, TimeSlotRepository};

pub use crate::support::errors::DomainError;
