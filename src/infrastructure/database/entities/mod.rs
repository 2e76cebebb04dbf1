//! Database entities module

pub mod booking;
pub mod center_schedule;
pub mod service_offering;
pub mod service_skill_requirement;
pub mod technician;
pub mod technician_skill;
pub mod technician_time_slot;
pub mod time_slot;

pub use booking::Entity as Booking;
pub use center_schedule::Entity as CenterSchedule;
pub use service_offering::Entity as ServiceOffering;
pub use service_skill_requirement::Entity as ServiceSkillRequirement;
pub use technician::Entity as Technician;
pub use technician_skill::Entity as TechnicianSkill;
pub use technician_time_slot::Entity as TechnicianTimeSlot;
pub use time_slot::Entity as TimeSlot;
