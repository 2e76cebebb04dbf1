//! SeaORM implementation of CenterScheduleRepository

use async_trait::async_trait;
use chrono::Weekday;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::center_schedule::{CenterSchedule, CenterScheduleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::center_schedule;

pub struct SeaOrmCenterScheduleRepository {
    db: DatabaseConnection,
}

impl SeaOrmCenterScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn weekday_to_db(day: Weekday) -> i32 {
    day.number_from_monday() as i32
}

fn weekday_from_db(value: i32) -> DomainResult<Weekday> {
    match value {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        other => Err(DomainError::Storage(format!(
            "invalid day_of_week in center_schedules: {}",
            other
        ))),
    }
}

fn model_to_domain(m: center_schedule::Model) -> DomainResult<CenterSchedule> {
    Ok(CenterSchedule {
        id: m.id,
        center_id: m.center_id,
        day_of_week: weekday_from_db(m.day_of_week)?,
        open_time: m.open_time,
        close_time: m.close_time,
        effective_from: m.effective_from,
        effective_to: m.effective_to,
        is_active: m.is_active,
        capacity: m.capacity,
        remaining_capacity: m.remaining_capacity,
    })
}

#[async_trait]
impl CenterScheduleRepository for SeaOrmCenterScheduleRepository {
    async fn find_for_center(&self, center_id: i32) -> DomainResult<Vec<CenterSchedule>> {
        let models = center_schedule::Entity::find()
            .filter(center_schedule::Column::CenterId.eq(center_id))
            .order_by_asc(center_schedule::Column::DayOfWeek)
            .order_by_asc(center_schedule::Column::EffectiveFrom)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn create(&self, s: CenterSchedule) -> DomainResult<CenterSchedule> {
        let model = center_schedule::ActiveModel {
            center_id: Set(s.center_id),
            day_of_week: Set(weekday_to_db(s.day_of_week)),
            open_time: Set(s.open_time),
            close_time: Set(s.close_time),
            effective_from: Set(s.effective_from),
            effective_to: Set(s.effective_to),
            is_active: Set(s.is_active),
            capacity: Set(s.capacity),
            remaining_capacity: Set(s.remaining_capacity),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_mapping_is_iso() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(weekday_from_db(weekday_to_db(day)).unwrap(), day);
        }
        assert_eq!(weekday_to_db(Weekday::Sun), 7);
        assert!(weekday_from_db(0).is_err());
    }
}
