//! Skill requirement of a service

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_skill_requirements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub service_id: i32,
    pub skill_id: i32,
    pub min_level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_offering::Entity",
        from = "Column::ServiceId",
        to = "super::service_offering::Column::Id"
    )]
    Service,
}

impl Related<super::service_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
