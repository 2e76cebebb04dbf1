//! SeaORM implementation of TimeSlotRepository

use async_trait::async_trait;
use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::time_slot::{TimeSlot, TimeSlotRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::time_slot;

pub struct SeaOrmTimeSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmTimeSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: time_slot::Model) -> TimeSlot {
    TimeSlot {
        id: m.id,
        slot_time: m.slot_time,
        label: m.label,
        is_active: m.is_active,
    }
}

#[async_trait]
impl TimeSlotRepository for SeaOrmTimeSlotRepository {
    async fn create(&self, slot_time: NaiveTime, label: &str) -> DomainResult<TimeSlot> {
        debug!(%slot_time, label, "Creating time slot");

        let model = time_slot::ActiveModel {
            slot_time: Set(slot_time),
            label: Set(label.to_string()),
            is_active: Set(true),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<TimeSlot>> {
        let model = time_slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_time(&self, slot_time: NaiveTime) -> DomainResult<Option<TimeSlot>> {
        let model = time_slot::Entity::find()
            .filter(time_slot::Column::SlotTime.eq(slot_time))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_label(&self, label: &str) -> DomainResult<Option<TimeSlot>> {
        let model = time_slot::Entity::find()
            .filter(time_slot::Column::Label.eq(label))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, active_only: bool) -> DomainResult<Vec<TimeSlot>> {
        let mut query = time_slot::Entity::find();
        if active_only {
            query = query.filter(time_slot::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(time_slot::Column::SlotTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn set_active(&self, id: i32, is_active: bool) -> DomainResult<bool> {
        let Some(existing) = time_slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(false);
        };

        let mut active: time_slot::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(true)
    }
}
