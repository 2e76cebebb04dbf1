//! Bookable services and the skills they require

pub mod model;
pub mod repository;

pub use model::{ServiceOffering, SkillRequirement};
pub use repository::ServiceOfferingRepository;
