//! Create time_slots table
//!
//! The system-wide slot catalog. Both the start time and the label are unique.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeSlots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeSlots::SlotTime).time().not_null())
                    .col(ColumnDef::new(TimeSlots::Label).string().not_null())
                    .col(
                        ColumnDef::new(TimeSlots::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_slots_slot_time")
                    .table(TimeSlots::Table)
                    .col(TimeSlots::SlotTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_slots_label")
                    .table(TimeSlots::Table)
                    .col(TimeSlots::Label)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TimeSlots {
    Table,
    Id,
    SlotTime,
    Label,
    IsActive,
}
