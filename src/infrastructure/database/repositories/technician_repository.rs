//! SeaORM implementation of TechnicianRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::db_err;
use crate::domain::technician::{Technician, TechnicianRepository, TechnicianSkill};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{technician, technician_skill};

pub struct SeaOrmTechnicianRepository {
    db: DatabaseConnection,
}

impl SeaOrmTechnicianRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn attach_skills(&self, models: Vec<technician::Model>) -> DomainResult<Vec<Technician>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut skills: HashMap<i32, Vec<TechnicianSkill>> = HashMap::new();
        if !ids.is_empty() {
            let rows = technician_skill::Entity::find()
                .filter(technician_skill::Column::TechnicianId.is_in(ids))
                .all(&self.db)
                .await
                .map_err(db_err)?;
            for row in rows {
                skills.entry(row.technician_id).or_default().push(TechnicianSkill {
                    skill_id: row.skill_id,
                    level: row.level,
                });
            }
        }

        Ok(models
            .into_iter()
            .map(|m| Technician {
                skills: skills.remove(&m.id).unwrap_or_default(),
                id: m.id,
                center_id: m.center_id,
                full_name: m.full_name,
                is_active: m.is_active,
            })
            .collect())
    }
}

#[async_trait]
impl TechnicianRepository for SeaOrmTechnicianRepository {
    async fn find_active_for_center(&self, center_id: i32) -> DomainResult<Vec<Technician>> {
        let models = technician::Entity::find()
            .filter(technician::Column::CenterId.eq(center_id))
            .filter(technician::Column::IsActive.eq(true))
            .order_by_asc(technician::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.attach_skills(models).await
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Technician>> {
        let Some(model) = technician::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(self.attach_skills(vec![model]).await?.pop())
    }

    async fn create(&self, t: Technician) -> DomainResult<Technician> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = technician::ActiveModel {
            center_id: Set(t.center_id),
            full_name: Set(t.full_name),
            is_active: Set(t.is_active),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for skill in &t.skills {
            technician_skill::ActiveModel {
                technician_id: Set(saved.id),
                skill_id: Set(skill.skill_id),
                level: Set(skill.level),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(Technician {
            id: saved.id,
            center_id: saved.center_id,
            full_name: saved.full_name,
            is_active: saved.is_active,
            skills: t.skills,
        })
    }
}
