//! SeaORM implementation of ServiceOfferingRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::db_err;
use crate::domain::service_offering::{ServiceOffering, ServiceOfferingRepository, SkillRequirement};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{service_offering, service_skill_requirement};

pub struct SeaOrmServiceOfferingRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceOfferingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceOfferingRepository for SeaOrmServiceOfferingRepository {
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<ServiceOffering>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = service_offering::Entity::find()
            .filter(service_offering::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(service_offering::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let requirements = service_skill_requirement::Entity::find()
            .filter(service_skill_requirement::Column::ServiceId.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_service: HashMap<i32, Vec<SkillRequirement>> = HashMap::new();
        for r in requirements {
            by_service.entry(r.service_id).or_default().push(SkillRequirement {
                skill_id: r.skill_id,
                min_level: r.min_level,
            });
        }

        Ok(models
            .into_iter()
            .map(|m| ServiceOffering {
                required_skills: by_service.remove(&m.id).unwrap_or_default(),
                id: m.id,
                name: m.name,
                duration_minutes: m.duration_minutes,
                is_active: m.is_active,
            })
            .collect())
    }

    async fn create(&self, s: ServiceOffering) -> DomainResult<ServiceOffering> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = service_offering::ActiveModel {
            name: Set(s.name),
            duration_minutes: Set(s.duration_minutes),
            is_active: Set(s.is_active),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for req in &s.required_skills {
            service_skill_requirement::ActiveModel {
                service_id: Set(saved.id),
                skill_id: Set(req.skill_id),
                min_level: Set(req.min_level),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(ServiceOffering {
            id: saved.id,
            name: saved.name,
            duration_minutes: saved.duration_minutes,
            is_active: saved.is_active,
            required_skills: s.required_skills,
        })
    }
}
