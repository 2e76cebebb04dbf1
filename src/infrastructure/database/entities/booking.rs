//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,
    pub vehicle_id: i32,
    pub center_id: i32,
    pub technician_id: i32,

    /// JSON array of service IDs
    pub service_ids: String,

    pub booking_date: Date,

    /// JSON array of occupied slot IDs, kept after cancellation
    pub slot_ids: String,

    /// PENDING, CONFIRMED, CHECKED_IN, IN_PROGRESS, COMPLETED, PAID, CANCELLED
    pub status: String,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
