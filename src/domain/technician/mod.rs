//! Technician aggregate (read-only here; HR data is managed elsewhere)

pub mod model;
pub mod repository;

pub use model::{Technician, TechnicianSkill};
pub use repository::TechnicianRepository;
