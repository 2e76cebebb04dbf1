//! Center operating calendar
//!
//! Per-center, per-weekday open windows. Written by center administration,
//! read-only here.

pub mod model;
pub mod repository;

pub use model::{CenterSchedule, OperatingWindow};
pub use repository::CenterScheduleRepository;
