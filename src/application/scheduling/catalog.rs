//! Slot catalog and technician calendar maintenance

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::info;
use validator::Validate;

use super::planning;
use crate::config::SchedulingConfig;
use crate::domain::{
    CreateTimeSlotRequest, DomainError, DomainResult, RepositoryProvider, TimeSlot,
};

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
    config: SchedulingConfig,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: SchedulingConfig) -> Self {
        Self { repos, config }
    }

    /// Add a slot to the catalog. Start times and labels are unique.
    pub async fn create_time_slot(&self, request: CreateTimeSlotRequest) -> DomainResult<TimeSlot> {
        request.validate()?;
        let label = request.label.trim();
        if label.is_empty() {
            return Err(DomainError::Validation("time slot label must not be blank".into()));
        }

        let slots = self.repos.time_slots();
        if slots.find_by_time(request.slot_time).await?.is_some() {
            return Err(DomainError::Validation(format!(
                "a time slot starting at {} already exists",
                request.slot_time.format("%H:%M")
            )));
        }
        if slots.find_by_label(label).await?.is_some() {
            return Err(DomainError::Validation(format!(
                "a time slot labelled '{}' already exists",
                label
            )));
        }

        let slot = slots.create(request.slot_time, label).await?;
        info!(slot_id = slot.id, slot_time = %slot.slot_time, label = %slot.label, "Time slot created");
        Ok(slot)
    }

    /// Inactive slots are never offered or booked; existing rows stay untouched.
    pub async fn set_time_slot_active(&self, slot_id: i32, is_active: bool) -> DomainResult<()> {
        if !self.repos.time_slots().set_active(slot_id, is_active).await? {
            return Err(DomainError::not_found("TimeSlot", "id", slot_id));
        }
        info!(slot_id, is_active, "Time slot activity changed");
        Ok(())
    }

    pub async fn list_time_slots(&self, active_only: bool) -> DomainResult<Vec<TimeSlot>> {
        self.repos.time_slots().list(active_only).await
    }

    /// Fill the catalog with back-to-back slots from `start` until `end`.
    /// Start times already present are skipped. Returns how many were added.
    pub async fn seed_default_catalog(&self, start: NaiveTime, end: NaiveTime) -> DomainResult<usize> {
        if start >= end {
            return Err(DomainError::Validation(format!(
                "catalog start {} must be before end {}",
                start, end
            )));
        }

        let step = Duration::minutes(i64::from(self.config.slot_minutes));
        let mut created = 0;
        let mut slot_time = start;
        loop {
            let slot_end = slot_time + step;
            // stop at the end bound or when the clock wraps past midnight
            if slot_end > end || slot_end <= slot_time {
                break;
            }
            if self.repos.time_slots().find_by_time(slot_time).await?.is_none() {
                let label = TimeSlot::default_label(slot_time, self.config.slot_minutes);
                self.repos.time_slots().create(slot_time, &label).await?;
                created += 1;
            }
            slot_time = slot_end;
        }

        if created > 0 {
            info!(created, %start, %end, "Seeded slot catalog");
        }
        Ok(created)
    }

    /// Create the technician's calendar rows for `date`, one per active
    /// catalog slot inside the center's operating window. Existing rows are
    /// left as they are. A closed day creates nothing.
    pub async fn generate_technician_day(
        &self,
        technician_id: i32,
        date: NaiveDate,
    ) -> DomainResult<usize> {
        let technician = self
            .repos
            .technicians()
            .find_by_id(technician_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Technician", "id", technician_id))?;
        planning::ensure_technician_serves(&technician, technician.center_id)?;

        let Some(window) =
            planning::operating_window(self.repos.as_ref(), technician.center_id, date).await?
        else {
            return Ok(0);
        };

        let slot_ids: Vec<i32> =
            planning::operating_slots(self.repos.as_ref(), &window, self.config.slot_minutes)
                .await?
                .iter()
                .map(|s| s.id)
                .collect();

        let created = self
            .repos
            .calendar()
            .generate_day(technician_id, date, &slot_ids)
            .await?;
        info!(technician_id, %date, created, "Technician day generated");
        Ok(created)
    }
}
