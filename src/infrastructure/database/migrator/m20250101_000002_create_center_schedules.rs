//! Create center_schedules table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CenterSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CenterSchedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CenterSchedules::CenterId).integer().not_null())
                    .col(ColumnDef::new(CenterSchedules::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(CenterSchedules::OpenTime).time().not_null())
                    .col(ColumnDef::new(CenterSchedules::CloseTime).time().not_null())
                    .col(ColumnDef::new(CenterSchedules::EffectiveFrom).date().not_null())
                    .col(ColumnDef::new(CenterSchedules::EffectiveTo).date())
                    .col(
                        ColumnDef::new(CenterSchedules::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CenterSchedules::Capacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CenterSchedules::RemainingCapacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_center_schedules_center_day")
                    .table(CenterSchedules::Table)
                    .col(CenterSchedules::CenterId)
                    .col(CenterSchedules::DayOfWeek)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CenterSchedules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CenterSchedules {
    Table,
    Id,
    CenterId,
    DayOfWeek,
    OpenTime,
    CloseTime,
    EffectiveFrom,
    EffectiveTo,
    IsActive,
    Capacity,
    RemainingCapacity,
}
