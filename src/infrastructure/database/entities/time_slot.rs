//! Time slot catalog entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub slot_time: Time,

    #[sea_orm(unique)]
    pub label: String,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::technician_time_slot::Entity")]
    TechnicianTimeSlots,
}

impl Related<super::technician_time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TechnicianTimeSlots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
