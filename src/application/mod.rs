//! Application layer: scheduling services built on the domain traits

pub mod scheduling;

pub use scheduling::{
    start_hold_sweeper, AvailabilityService, BookingOutcome, BookingService, CatalogService,
    SlotSelection,
};
