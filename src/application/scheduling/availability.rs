//! Availability calculator
//!
//! Read-only: combines the operating window, the slot catalog, technician
//! skills, calendar rows and live holds into what a customer may pick.
//! Answers are snapshots and may be stale by the time a booking is made.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use super::planning::{self, ServicePlan};
use crate::config::SchedulingConfig;
use crate::domain::{
    DomainError, DomainResult, HoldStore, OperatingWindow, RepositoryProvider, Technician, TimeSlot,
};

/// One catalog slot and the technicians who could start the requested
/// services there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub slot_id: i32,
    pub slot_time: NaiveTime,
    pub label: String,
    pub technician_ids: Vec<i32>,
}

impl SlotAvailability {
    pub fn is_available(&self) -> bool {
        !self.technician_ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    pub center_id: i32,
    pub date: NaiveDate,
    /// Consecutive slots a booking of the requested services occupies
    pub slot_count: usize,
    /// Every operating slot of the day, available or not. Empty when closed.
    pub slots: Vec<SlotAvailability>,
}

impl AvailabilityResult {
    pub fn is_closed(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, slot_id: i32) -> Option<&SlotAvailability> {
        self.slots.iter().find(|s| s.slot_id == slot_id)
    }

    pub fn available_slot_ids(&self) -> Vec<i32> {
        self.slots
            .iter()
            .filter(|s| s.is_available())
            .map(|s| s.slot_id)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableTime {
    pub slot_id: i32,
    pub slot_time: NaiveTime,
    pub label: String,
}

impl From<&TimeSlot> for AvailableTime {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            slot_id: slot.id,
            slot_time: slot.slot_time,
            label: slot.label.clone(),
        }
    }
}

/// Start slots open to one technician
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicianAvailability {
    pub technician_id: i32,
    pub full_name: String,
    pub start_slot_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableTimesResult {
    pub center_id: i32,
    pub date: NaiveDate,
    pub technician_id: Option<i32>,
    pub slot_count: usize,
    /// Start times with at least one eligible technician, in time order
    pub times: Vec<AvailableTime>,
    /// Eligible technicians with at least one start time
    pub technicians: Vec<TechnicianAvailability>,
}

/// Everything one query needs, loaded once
struct DaySnapshot {
    slots: Vec<TimeSlot>,
    technicians: Vec<Technician>,
    /// (technician, slot) pairs whose calendar row can still be assigned
    assignable: HashMap<(i32, i32), bool>,
    /// (technician, slot) -> customer holding it
    holders: HashMap<(i32, i32), i32>,
}

impl DaySnapshot {
    /// Whether `technician_id` can take the run of slots starting at `index`
    fn technician_can_start(
        &self,
        technician_id: i32,
        index: usize,
        slot_count: usize,
        slot_minutes: u32,
        customer_id: Option<i32>,
    ) -> bool {
        let Some(run) = planning::contiguous_run(&self.slots, index, slot_count, slot_minutes)
        else {
            return false;
        };

        run.iter().all(|slot| {
            let key = (technician_id, slot.id);
            let free = self.assignable.get(&key).copied().unwrap_or(false);
            let held_by_other = self
                .holders
                .get(&key)
                .is_some_and(|holder| Some(*holder) != customer_id);
            free && !held_by_other
        })
    }
}

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
    holds: Arc<dyn HoldStore>,
    config: SchedulingConfig,
}

impl AvailabilityService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        holds: Arc<dyn HoldStore>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            repos,
            holds,
            config,
        }
    }

    /// Per-slot availability of a center on `date` for the requested
    /// services. Any live hold hides a slot.
    pub async fn get_availability(
        &self,
        center_id: i32,
        date: NaiveDate,
        service_ids: &[i32],
    ) -> DomainResult<AvailabilityResult> {
        self.availability(center_id, date, service_ids, None).await
    }

    /// Same as [`get_availability`](Self::get_availability) but slots held
    /// by `customer_id` stay visible to that customer.
    pub async fn get_availability_for_customer(
        &self,
        center_id: i32,
        date: NaiveDate,
        service_ids: &[i32],
        customer_id: i32,
    ) -> DomainResult<AvailabilityResult> {
        self.availability(center_id, date, service_ids, Some(customer_id))
            .await
    }

    /// Start times with at least one eligible technician, optionally
    /// narrowed to one technician. `service_ids` may be empty.
    pub async fn get_available_times(
        &self,
        center_id: i32,
        date: NaiveDate,
        technician_id: Option<i32>,
        service_ids: &[i32],
    ) -> DomainResult<AvailableTimesResult> {
        // No services: any single free slot, no skill requirement.
        let plan = if service_ids.is_empty() {
            ServicePlan::single_slot()
        } else {
            planning::plan_services(self.repos.as_ref(), service_ids, self.config.slot_minutes)
                .await?
        };
        let mut result = AvailableTimesResult {
            center_id,
            date,
            technician_id,
            slot_count: plan.slot_count,
            times: Vec::new(),
            technicians: Vec::new(),
        };

        let Some(window) = planning::operating_window(self.repos.as_ref(), center_id, date).await?
        else {
            return Ok(result);
        };
        let candidates = self.candidates(center_id, technician_id).await?;
        let snapshot = self.snapshot(&window, &plan, candidates).await?;

        let mut per_technician: Vec<TechnicianAvailability> = snapshot
            .technicians
            .iter()
            .map(|t| TechnicianAvailability {
                technician_id: t.id,
                full_name: t.full_name.clone(),
                start_slot_ids: Vec::new(),
            })
            .collect();

        for (index, slot) in snapshot.slots.iter().enumerate() {
            let mut any = false;
            for entry in per_technician.iter_mut() {
                if snapshot.technician_can_start(
                    entry.technician_id,
                    index,
                    plan.slot_count,
                    self.config.slot_minutes,
                    None,
                ) {
                    entry.start_slot_ids.push(slot.id);
                    any = true;
                }
            }
            if any {
                result.times.push(AvailableTime::from(slot));
            }
        }

        per_technician.retain(|t| !t.start_slot_ids.is_empty());
        result.technicians = per_technician;

        debug!(
            center_id,
            %date,
            ?technician_id,
            times = result.times.len(),
            "Available times computed"
        );
        Ok(result)
    }

    async fn availability(
        &self,
        center_id: i32,
        date: NaiveDate,
        service_ids: &[i32],
        customer_id: Option<i32>,
    ) -> DomainResult<AvailabilityResult> {
        let plan = planning::plan_services(self.repos.as_ref(), service_ids, self.config.slot_minutes)
            .await?;
        let mut result = AvailabilityResult {
            center_id,
            date,
            slot_count: plan.slot_count,
            slots: Vec::new(),
        };

        let Some(window) = planning::operating_window(self.repos.as_ref(), center_id, date).await?
        else {
            debug!(center_id, %date, "Center closed");
            return Ok(result);
        };
        let candidates = self.candidates(center_id, None).await?;
        let snapshot = self.snapshot(&window, &plan, candidates).await?;

        result.slots = snapshot
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotAvailability {
                slot_id: slot.id,
                slot_time: slot.slot_time,
                label: slot.label.clone(),
                technician_ids: snapshot
                    .technicians
                    .iter()
                    .filter(|t| {
                        snapshot.technician_can_start(
                            t.id,
                            index,
                            plan.slot_count,
                            self.config.slot_minutes,
                            customer_id,
                        )
                    })
                    .map(|t| t.id)
                    .collect(),
            })
            .collect();

        debug!(
            center_id,
            %date,
            available = result.available_slot_ids().len(),
            total = result.slots.len(),
            "Availability computed"
        );
        Ok(result)
    }

    /// Active technicians of the center, or the one requested
    async fn candidates(
        &self,
        center_id: i32,
        technician_id: Option<i32>,
    ) -> DomainResult<Vec<Technician>> {
        match technician_id {
            None => self.repos.technicians().find_active_for_center(center_id).await,
            Some(id) => {
                let technician = self
                    .repos
                    .technicians()
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Technician", "id", id))?;
                if technician.center_id != center_id {
                    return Err(DomainError::Validation(format!(
                        "technician {} does not work at center {}",
                        id, center_id
                    )));
                }
                Ok(if technician.is_active {
                    vec![technician]
                } else {
                    Vec::new()
                })
            }
        }
    }

    async fn snapshot(
        &self,
        window: &OperatingWindow,
        plan: &ServicePlan,
        candidates: Vec<Technician>,
    ) -> DomainResult<DaySnapshot> {
        let slots = planning::operating_slots(self.repos.as_ref(), window, self.config.slot_minutes)
            .await?;
        let technicians: Vec<Technician> = candidates
            .into_iter()
            .filter(|t| plan.policy.is_satisfied_by(t))
            .collect();

        let ids: Vec<i32> = technicians.iter().map(|t| t.id).collect();
        let assignable = self
            .repos
            .calendar()
            .find_for_technicians(&ids, window.date)
            .await?
            .into_iter()
            .map(|row| ((row.technician_id, row.slot_id), row.status().is_assignable()))
            .collect();

        let holders = self
            .holds
            .holds_for(window.center_id, window.date)
            .await?
            .into_iter()
            .map(|h| ((h.technician_id, h.slot_id), h.customer_id))
            .collect();

        Ok(DaySnapshot {
            slots,
            technicians,
            assignable,
            holders,
        })
    }
}
