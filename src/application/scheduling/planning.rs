//! Resolution steps shared by availability queries and bookings:
//! operating window, requested services, and contiguous slot spans.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::skill_policy::SkillPolicy;
use crate::domain::{
    CenterSchedule, DomainError, DomainResult, OperatingWindow, RepositoryProvider, SlotSpan,
    Technician, TimeSlot,
};

/// What the requested services demand of a technician and the calendar
#[derive(Debug, Clone)]
pub struct ServicePlan {
    /// Requested IDs, deduplicated and sorted
    pub service_ids: Vec<i32>,
    pub policy: SkillPolicy,
    pub total_minutes: i64,
    /// Consecutive slots one booking of these services occupies
    pub slot_count: usize,
}

/// A customer's pick: one technician and the first slot of the span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelection {
    pub center_id: i32,
    pub date: NaiveDate,
    pub technician_id: i32,
    pub start_slot_id: i32,
    pub service_ids: Vec<i32>,
}

/// A selection checked against the catalog, the center and the technician
#[derive(Debug, Clone)]
pub struct PlannedSpan {
    pub window: OperatingWindow,
    pub technician: Technician,
    pub services: ServicePlan,
    pub span: SlotSpan,
}

impl ServicePlan {
    /// One slot, open to every technician
    pub fn single_slot() -> Self {
        Self {
            service_ids: Vec::new(),
            policy: SkillPolicy::default(),
            total_minutes: 0,
            slot_count: 1,
        }
    }
}

pub fn slots_needed(total_minutes: i64, slot_minutes: u32) -> usize {
    let slot_minutes = i64::from(slot_minutes.max(1));
    let needed = (total_minutes.max(0) + slot_minutes - 1) / slot_minutes;
    usize::try_from(needed.max(1)).unwrap_or(1)
}

pub async fn plan_services(
    repos: &dyn RepositoryProvider,
    service_ids: &[i32],
    slot_minutes: u32,
) -> DomainResult<ServicePlan> {
    let ids: Vec<i32> = service_ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Err(DomainError::Validation("at least one service is required".into()));
    }

    let services = repos.service_offerings().find_by_ids(&ids).await?;
    if let Some(&missing) = ids.iter().find(|id| !services.iter().any(|s| s.id == **id)) {
        return Err(DomainError::not_found("Service", "id", missing));
    }
    if let Some(inactive) = services.iter().find(|s| !s.is_active) {
        return Err(DomainError::Validation(format!(
            "service {} is not offered any more",
            inactive.id
        )));
    }

    let total_minutes: i64 = services
        .iter()
        .map(|s| i64::from(s.duration_minutes.max(0)))
        .sum();

    Ok(ServicePlan {
        service_ids: ids,
        policy: SkillPolicy::from_services(&services),
        total_minutes,
        slot_count: slots_needed(total_minutes, slot_minutes),
    })
}

/// The center's window on `date`, `None` when it is closed that day.
/// A center without any schedule row is unknown.
pub async fn operating_window(
    repos: &dyn RepositoryProvider,
    center_id: i32,
    date: NaiveDate,
) -> DomainResult<Option<OperatingWindow>> {
    let schedules = repos.center_schedules().find_for_center(center_id).await?;
    if schedules.is_empty() {
        return Err(DomainError::not_found("Center", "id", center_id));
    }
    Ok(CenterSchedule::resolve(&schedules, date))
}

/// Active catalog slots lying fully inside the window, in time order
pub async fn operating_slots(
    repos: &dyn RepositoryProvider,
    window: &OperatingWindow,
    slot_minutes: u32,
) -> DomainResult<Vec<TimeSlot>> {
    let mut slots: Vec<TimeSlot> = repos
        .time_slots()
        .list(true)
        .await?
        .into_iter()
        .filter(|s| s.fits_within(window.open, window.close, slot_minutes))
        .collect();
    slots.sort_by_key(|s| s.slot_time);
    Ok(slots)
}

/// `count` slots starting at `index`, if they exist and follow one another
pub fn contiguous_run(
    slots: &[TimeSlot],
    index: usize,
    count: usize,
    slot_minutes: u32,
) -> Option<&[TimeSlot]> {
    let run = slots.get(index..index.checked_add(count)?)?;
    run.windows(2)
        .all(|pair| pair[1].follows(&pair[0], slot_minutes))
        .then_some(run)
}

/// Check a selection end to end and expand it into the slot span it occupies.
///
/// Every failure here is an input error: unknown center, technician,
/// slot or service, a closed day, a technician lacking skills, or a span
/// that leaves the operating window.
pub async fn plan_selection(
    repos: &dyn RepositoryProvider,
    selection: &SlotSelection,
    slot_minutes: u32,
) -> DomainResult<PlannedSpan> {
    let window = operating_window(repos, selection.center_id, selection.date)
        .await?
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "center {} is closed on {}",
                selection.center_id, selection.date
            ))
        })?;

    let services = plan_services(repos, &selection.service_ids, slot_minutes).await?;

    let technician = repos
        .technicians()
        .find_by_id(selection.technician_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Technician", "id", selection.technician_id))?;
    ensure_technician_serves(&technician, selection.center_id)?;

    let missing = services.policy.missing_for(&technician);
    if !missing.is_empty() {
        let skills: Vec<String> = missing
            .iter()
            .map(|r| format!("skill {} level {}", r.skill_id, r.min_level))
            .collect();
        return Err(DomainError::Validation(format!(
            "technician {} lacks {}",
            technician.id,
            skills.join(", ")
        )));
    }

    let start = repos
        .time_slots()
        .find_by_id(selection.start_slot_id)
        .await?
        .ok_or_else(|| DomainError::not_found("TimeSlot", "id", selection.start_slot_id))?;
    if !start.is_active {
        return Err(DomainError::Validation(format!(
            "time slot {} is inactive",
            start.id
        )));
    }

    let slots = operating_slots(repos, &window, slot_minutes).await?;
    let run = slots
        .iter()
        .position(|s| s.id == start.id)
        .and_then(|index| contiguous_run(&slots, index, services.slot_count, slot_minutes))
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "{} consecutive slots starting at {} do not fit the operating hours",
                services.slot_count, start.label
            ))
        })?;

    let span = SlotSpan {
        technician_id: technician.id,
        work_date: selection.date,
        slot_ids: run.iter().map(|s| s.id).collect(),
    };

    Ok(PlannedSpan {
        window,
        technician,
        services,
        span,
    })
}

pub fn ensure_technician_serves(technician: &Technician, center_id: i32) -> DomainResult<()> {
    if technician.center_id != center_id {
        return Err(DomainError::Validation(format!(
            "technician {} does not work at center {}",
            technician.id, center_id
        )));
    }
    if !technician.is_active {
        return Err(DomainError::Validation(format!(
            "technician {} is inactive",
            technician.id
        )));
    }
    Ok(())
}
