//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::calendar::TechnicianSlotRepository;
use crate::domain::center_schedule::CenterScheduleRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::service_offering::ServiceOfferingRepository;
use crate::domain::technician::TechnicianRepository;
use crate::domain::time_slot::TimeSlotRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::center_schedule_repository::SeaOrmCenterScheduleRepository;
use super::service_offering_repository::SeaOrmServiceOfferingRepository;
use super::technician_repository::SeaOrmTechnicianRepository;
use super::technician_slot_repository::SeaOrmTechnicianSlotRepository;
use super::time_slot_repository::SeaOrmTimeSlotRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let slots = repos.time_slots().list(true).await?;
/// let rows = repos.calendar().find_for_booking(42).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    time_slots: SeaOrmTimeSlotRepository,
    center_schedules: SeaOrmCenterScheduleRepository,
    technicians: SeaOrmTechnicianRepository,
    service_offerings: SeaOrmServiceOfferingRepository,
    calendar: SeaOrmTechnicianSlotRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            time_slots: SeaOrmTimeSlotRepository::new(db.clone()),
            center_schedules: SeaOrmCenterScheduleRepository::new(db.clone()),
            technicians: SeaOrmTechnicianRepository::new(db.clone()),
            service_offerings: SeaOrmServiceOfferingRepository::new(db.clone()),
            calendar: SeaOrmTechnicianSlotRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn time_slots(&self) -> &dyn TimeSlotRepository {
        &self.time_slots
    }

    fn center_schedules(&self) -> &dyn CenterScheduleRepository {
        &self.center_schedules
    }

    fn technicians(&self) -> &dyn TechnicianRepository {
        &self.technicians
    }

    fn service_offerings(&self) -> &dyn ServiceOfferingRepository {
        &self.service_offerings
    }

    fn calendar(&self) -> &dyn TechnicianSlotRepository {
        &self.calendar
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}
