//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_time_slots;
mod m20250101_000002_create_center_schedules;
mod m20250101_000003_create_technicians;
mod m20250101_000004_create_services;
mod m20250101_000005_create_bookings;
mod m20250101_000006_create_technician_time_slots;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_time_slots::Migration),
            Box::new(m20250101_000002_create_center_schedules::Migration),
            Box::new(m20250101_000003_create_technicians::Migration),
            Box::new(m20250101_000004_create_services::Migration),
            Box::new(m20250101_000005_create_bookings::Migration),
            Box::new(m20250101_000006_create_technician_time_slots::Migration),
        ]
    }
}
