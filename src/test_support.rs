//! Shared fixtures for service-level tests: a migrated in-memory SQLite
//! database with a seeded catalog and one open center.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, Weekday};
use sea_orm_migration::MigratorTrait;

use crate::application::{AvailabilityService, BookingService, CatalogService};
use crate::config::SchedulingConfig;
use crate::domain::{
    CenterSchedule, RepositoryProvider, ServiceOffering, SkillRequirement, SlotStatus, Technician,
    TechnicianSkill, TechnicianTimeSlot, TimeSlot,
};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, InMemoryHoldStore, SeaOrmRepositoryProvider};
use crate::notifications::{create_event_bus, SharedEventBus};

pub const CENTER_ID: i32 = 1;

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// A Wednesday
pub fn work_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
}

pub struct Fixture {
    pub repos: Arc<dyn RepositoryProvider>,
    pub holds: Arc<InMemoryHoldStore>,
    pub events: SharedEventBus,
    pub config: SchedulingConfig,
}

impl Fixture {
    /// Catalog 08:00-17:00 in 30 minute slots (IDs 1..=18, 08:00 is 1),
    /// center 1 open 08:00-17:00 on Wednesdays.
    pub async fn new() -> Self {
        Self::with_config(SchedulingConfig {
            slot_minutes: 30,
            hold_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        })
        .await
    }

    pub async fn with_config(config: SchedulingConfig) -> Self {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let fixture = Self {
            repos: Arc::new(SeaOrmRepositoryProvider::new(db)),
            holds: Arc::new(InMemoryHoldStore::new()),
            events: create_event_bus(),
            config,
        };

        fixture
            .catalog()
            .seed_default_catalog(time("08:00"), time("17:00"))
            .await
            .unwrap();
        fixture
            .open_center(CENTER_ID, Weekday::Wed, "08:00", "17:00")
            .await;
        fixture
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.repos.clone(), self.config)
    }

    pub fn availability(&self) -> AvailabilityService {
        AvailabilityService::new(self.repos.clone(), self.holds.clone(), self.config)
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::new(
            self.repos.clone(),
            self.holds.clone(),
            self.events.clone(),
            self.config,
        )
    }

    pub async fn open_center(&self, center_id: i32, day: Weekday, open: &str, close: &str) {
        self.repos
            .center_schedules()
            .create(CenterSchedule {
                id: 0,
                center_id,
                day_of_week: day,
                open_time: time(open),
                close_time: time(close),
                effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                effective_to: None,
                is_active: true,
                capacity: 10,
                remaining_capacity: 10,
            })
            .await
            .unwrap();
    }

    /// Active technician of center 1 with a generated calendar for `work_date()`
    pub async fn technician(&self, name: &str, skills: &[(i32, i32)]) -> Technician {
        self.technician_at(CENTER_ID, name, skills).await
    }

    pub async fn technician_at(
        &self,
        center_id: i32,
        name: &str,
        skills: &[(i32, i32)],
    ) -> Technician {
        let technician = self
            .repos
            .technicians()
            .create(Technician {
                id: 0,
                center_id,
                full_name: name.to_string(),
                is_active: true,
                skills: skills
                    .iter()
                    .map(|&(skill_id, level)| TechnicianSkill { skill_id, level })
                    .collect(),
            })
            .await
            .unwrap();
        self.catalog()
            .generate_technician_day(technician.id, work_date())
            .await
            .unwrap();
        technician
    }

    pub async fn service(&self, name: &str, minutes: i32, skills: &[(i32, i32)]) -> ServiceOffering {
        self.repos
            .service_offerings()
            .create(ServiceOffering {
                id: 0,
                name: name.to_string(),
                duration_minutes: minutes,
                is_active: true,
                required_skills: skills
                    .iter()
                    .map(|&(skill_id, min_level)| SkillRequirement { skill_id, min_level })
                    .collect(),
            })
            .await
            .unwrap()
    }

    pub async fn slot_at(&self, start: &str) -> TimeSlot {
        self.repos
            .time_slots()
            .find_by_time(time(start))
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn row(&self, technician_id: i32, slot_id: i32) -> TechnicianTimeSlot {
        self.repos
            .calendar()
            .find(technician_id, work_date(), slot_id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn status(&self, technician_id: i32, slot_id: i32) -> SlotStatus {
        self.row(technician_id, slot_id).await.status()
    }
}
