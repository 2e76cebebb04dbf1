//! Technician domain entity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianSkill {
    pub skill_id: i32,
    pub level: i32,
}

/// A technician working at one service center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: i32,
    pub center_id: i32,
    pub full_name: String,
    pub is_active: bool,
    pub skills: Vec<TechnicianSkill>,
}

impl Technician {
    /// Level held for `skill_id`, if the technician has it at all
    pub fn skill_level(&self, skill_id: i32) -> Option<i32> {
        self.skills
            .iter()
            .filter(|s| s.skill_id == skill_id)
            .map(|s| s.level)
            .max()
    }
}
