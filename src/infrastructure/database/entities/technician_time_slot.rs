//! Technician time slot entity
//!
//! Unique on (technician_id, work_date, slot_id).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "technician_time_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub technician_id: i32,
    pub work_date: Date,
    pub slot_id: i32,

    pub is_available: bool,

    #[sea_orm(nullable)]
    pub booking_id: Option<i32>,

    #[sea_orm(nullable)]
    pub note: Option<String>,

    #[sea_orm(nullable)]
    pub released_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::time_slot::Entity",
        from = "Column::SlotId",
        to = "super::time_slot::Column::Id"
    )]
    TimeSlot,
    #[sea_orm(
        belongs_to = "super::booking::Entity",
        from = "Column::BookingId",
        to = "super::booking::Column::Id"
    )]
    Booking,
}

impl Related<super::time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlot.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
