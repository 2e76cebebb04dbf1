//! Center operating schedule entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "center_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub center_id: i32,

    /// ISO weekday: 1 = Monday .. 7 = Sunday
    pub day_of_week: i32,

    pub open_time: Time,
    pub close_time: Time,

    pub effective_from: Date,

    #[sea_orm(nullable)]
    pub effective_to: Option<Date>,

    pub is_active: bool,
    pub capacity: i32,
    pub remaining_capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
