//! Create technician_time_slots table
//!
//! The unique index on (technician_id, work_date, slot_id) is the final
//! authority against double assignment.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_time_slots::TimeSlots;
use super::m20250101_000003_create_technicians::Technicians;
use super::m20250101_000005_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TechnicianTimeSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TechnicianTimeSlots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TechnicianTimeSlots::TechnicianId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TechnicianTimeSlots::WorkDate).date().not_null())
                    .col(ColumnDef::new(TechnicianTimeSlots::SlotId).integer().not_null())
                    .col(
                        ColumnDef::new(TechnicianTimeSlots::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(TechnicianTimeSlots::BookingId).integer())
                    .col(ColumnDef::new(TechnicianTimeSlots::Note).text())
                    .col(ColumnDef::new(TechnicianTimeSlots::ReleasedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(TechnicianTimeSlots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_technician_time_slots_technician")
                            .from(TechnicianTimeSlots::Table, TechnicianTimeSlots::TechnicianId)
                            .to(Technicians::Table, Technicians::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_technician_time_slots_slot")
                            .from(TechnicianTimeSlots::Table, TechnicianTimeSlots::SlotId)
                            .to(TimeSlots::Table, TimeSlots::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_technician_time_slots_booking")
                            .from(TechnicianTimeSlots::Table, TechnicianTimeSlots::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_technician_time_slots_unique")
                    .table(TechnicianTimeSlots::Table)
                    .col(TechnicianTimeSlots::TechnicianId)
                    .col(TechnicianTimeSlots::WorkDate)
                    .col(TechnicianTimeSlots::SlotId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_technician_time_slots_booking")
                    .table(TechnicianTimeSlots::Table)
                    .col(TechnicianTimeSlots::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TechnicianTimeSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TechnicianTimeSlots {
    Table,
    Id,
    TechnicianId,
    WorkDate,
    SlotId,
    IsAvailable,
    BookingId,
    Note,
    ReleasedAt,
    CreatedAt,
}
