//! Scheduling use cases

mod availability;
mod booking;
mod catalog;
mod hold_sweeper;
pub mod planning;
mod skill_policy;

#[cfg(test)]
mod tests;

pub use availability::{
    AvailabilityResult, AvailabilityService, AvailableTime, AvailableTimesResult,
    SlotAvailability, TechnicianAvailability,
};
pub use booking::{BookingOutcome, BookingService, SelectionHold, Unavailability};
pub use catalog::CatalogService;
pub use hold_sweeper::start_hold_sweeper;
pub use planning::SlotSelection;
pub use skill_policy::SkillPolicy;
