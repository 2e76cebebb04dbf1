//! Service offering domain entity

use serde::{Deserialize, Serialize};

/// Minimum technician level for one skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill_id: i32,
    pub min_level: i32,
}

/// A service a customer can book (e.g. battery check, brake service)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: i32,
    pub name: String,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub required_skills: Vec<SkillRequirement>,
}
