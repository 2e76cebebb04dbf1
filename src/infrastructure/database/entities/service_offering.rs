//! Service offering entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub duration_minutes: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_skill_requirement::Entity")]
    SkillRequirements,
}

impl Related<super::service_skill_requirement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SkillRequirements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
