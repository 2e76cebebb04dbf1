//! Create technicians and technician_skills tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Technicians::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Technicians::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Technicians::CenterId).integer().not_null())
                    .col(ColumnDef::new(Technicians::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Technicians::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TechnicianSkills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TechnicianSkills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TechnicianSkills::TechnicianId).integer().not_null())
                    .col(ColumnDef::new(TechnicianSkills::SkillId).integer().not_null())
                    .col(
                        ColumnDef::new(TechnicianSkills::Level)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_technician_skills_technician")
                            .from(TechnicianSkills::Table, TechnicianSkills::TechnicianId)
                            .to(Technicians::Table, Technicians::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_technicians_center")
                    .table(Technicians::Table)
                    .col(Technicians::CenterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_technician_skills_unique")
                    .table(TechnicianSkills::Table)
                    .col(TechnicianSkills::TechnicianId)
                    .col(TechnicianSkills::SkillId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TechnicianSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Technicians::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Technicians {
    Table,
    Id,
    CenterId,
    FullName,
    IsActive,
}

#[derive(Iden)]
pub enum TechnicianSkills {
    Table,
    Id,
    TechnicianId,
    SkillId,
    Level,
}
