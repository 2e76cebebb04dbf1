//! Center schedule domain entity

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Opening hours of one center on one weekday, valid for a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterSchedule {
    pub id: i32,
    pub center_id: i32,
    pub day_of_week: Weekday,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub effective_from: NaiveDate,
    /// Open-ended when `None`
    pub effective_to: Option<NaiveDate>,
    pub is_active: bool,
    pub capacity: i32,
    pub remaining_capacity: i32,
}

/// The resolved open window of a center for a concrete date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingWindow {
    pub center_id: i32,
    pub date: NaiveDate,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl CenterSchedule {
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.day_of_week == date.weekday()
            && date >= self.effective_from
            && self.effective_to.map_or(true, |to| date <= to)
    }

    pub fn has_capacity(&self) -> bool {
        self.remaining_capacity > 0
    }

    /// Pick the schedule governing `date` out of a center's rows.
    ///
    /// When effective ranges overlap the most recently started one wins.
    /// Returns `None` when the center is closed that day, the window is
    /// empty, or no capacity is left.
    pub fn resolve(schedules: &[CenterSchedule], date: NaiveDate) -> Option<OperatingWindow> {
        let schedule = schedules
            .iter()
            .filter(|s| s.applies_on(date))
            .max_by_key(|s| (s.effective_from, s.id))?;

        if schedule.open_time >= schedule.close_time || !schedule.has_capacity() {
            return None;
        }

        Some(OperatingWindow {
            center_id: schedule.center_id,
            date,
            open: schedule.open_time,
            close: schedule.close_time,
        })
    }
}
