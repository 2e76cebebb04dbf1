//! Create bookings table
//!
//! Status is constrained to the booking lifecycle values.

use sea_orm_migration::prelude::*;

use super::m20250101_000003_create_technicians::Technicians;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Bookings::VehicleId).integer().not_null())
                    .col(ColumnDef::new(Bookings::CenterId).integer().not_null())
                    .col(ColumnDef::new(Bookings::TechnicianId).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::ServiceIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Bookings::BookingDate).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::SlotIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("PENDING")
                            .check(Expr::col(Bookings::Status).is_in([
                                "PENDING",
                                "CONFIRMED",
                                "CHECKED_IN",
                                "IN_PROGRESS",
                                "COMPLETED",
                                "PAID",
                                "CANCELLED",
                            ])),
                    )
                    .col(ColumnDef::new(Bookings::Notes).text())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_technician")
                            .from(Bookings::Table, Bookings::TechnicianId)
                            .to(Technicians::Table, Technicians::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_customer")
                    .table(Bookings::Table)
                    .col(Bookings::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_center_date")
                    .table(Bookings::Table)
                    .col(Bookings::CenterId)
                    .col(Bookings::BookingDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    CustomerId,
    VehicleId,
    CenterId,
    TechnicianId,
    ServiceIds,
    BookingDate,
    SlotIds,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
