//! Skill matching between services and technicians

use std::collections::BTreeMap;

use crate::domain::{ServiceOffering, SkillRequirement, Technician};

/// Union of the skill requirements of a set of services.
///
/// A skill required by several services keeps its highest level. A
/// technician qualifies when they hold every required skill at a level
/// greater than or equal to the required one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPolicy {
    requirements: BTreeMap<i32, i32>,
}

impl SkillPolicy {
    pub fn from_services(services: &[ServiceOffering]) -> Self {
        let mut policy = Self::default();
        for requirement in services.iter().flat_map(|s| s.required_skills.iter()) {
            policy.require(requirement.skill_id, requirement.min_level);
        }
        policy
    }

    pub fn require(&mut self, skill_id: i32, min_level: i32) {
        self.requirements
            .entry(skill_id)
            .and_modify(|level| *level = (*level).max(min_level))
            .or_insert(min_level);
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn requirements(&self) -> Vec<SkillRequirement> {
        self.requirements
            .iter()
            .map(|(&skill_id, &min_level)| SkillRequirement { skill_id, min_level })
            .collect()
    }

    pub fn is_satisfied_by(&self, technician: &Technician) -> bool {
        self.missing_for(technician).is_empty()
    }

    /// Requirements the technician does not meet
    pub fn missing_for(&self, technician: &Technician) -> Vec<SkillRequirement> {
        self.requirements
            .iter()
            .filter(|(&skill_id, &min_level)| {
                technician
                    .skill_level(skill_id)
                    .map_or(true, |level| level < min_level)
            })
            .map(|(&skill_id, &min_level)| SkillRequirement { skill_id, min_level })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TechnicianSkill;

    fn service(id: i32, skills: &[(i32, i32)]) -> ServiceOffering {
        ServiceOffering {
            id,
            name: format!("service-{}", id),
            duration_minutes: 30,
            is_active: true,
            required_skills: skills
                .iter()
                .map(|&(skill_id, min_level)| SkillRequirement { skill_id, min_level })
                .collect(),
        }
    }

    fn technician(skills: &[(i32, i32)]) -> Technician {
        Technician {
            id: 7,
            center_id: 1,
            full_name: "Tech".into(),
            is_active: true,
            skills: skills
                .iter()
                .map(|&(skill_id, level)| TechnicianSkill { skill_id, level })
                .collect(),
        }
    }

    #[test]
    fn overlapping_requirements_keep_highest_level() {
        let policy = SkillPolicy::from_services(&[service(1, &[(10, 2)]), service(2, &[(10, 3), (11, 1)])]);
        assert_eq!(
            policy.requirements(),
            vec![
                SkillRequirement { skill_id: 10, min_level: 3 },
                SkillRequirement { skill_id: 11, min_level: 1 },
            ]
        );
    }

    #[test]
    fn level_below_required_is_rejected() {
        let policy = SkillPolicy::from_services(&[service(1, &[(10, 3)])]);
        assert!(!policy.is_satisfied_by(&technician(&[(10, 2)])));
        assert!(policy.is_satisfied_by(&technician(&[(10, 3)])));
        assert!(policy.is_satisfied_by(&technician(&[(10, 5)])));
    }

    #[test]
    fn missing_skill_is_rejected() {
        let policy = SkillPolicy::from_services(&[service(1, &[(10, 1), (11, 1)])]);
        let missing = policy.missing_for(&technician(&[(10, 4)]));
        assert_eq!(missing, vec![SkillRequirement { skill_id: 11, min_level: 1 }]);
    }

    #[test]
    fn no_requirements_admit_everyone() {
        let policy = SkillPolicy::from_services(&[service(1, &[])]);
        assert!(policy.is_empty());
        assert!(policy.is_satisfied_by(&technician(&[])));
    }
}
