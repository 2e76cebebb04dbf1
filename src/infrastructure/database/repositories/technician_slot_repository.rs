//! SeaORM implementation of TechnicianSlotRepository
//!
//! Claims and releases are conditional `UPDATE`s: the `WHERE` clause
//! re-states the expected current state and `rows_affected` says whether
//! this writer won.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::calendar::{TechnicianSlotRepository, TechnicianTimeSlot};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::technician_time_slot;

pub struct SeaOrmTechnicianSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmTechnicianSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: technician_time_slot::Model) -> TechnicianTimeSlot {
    TechnicianTimeSlot {
        id: m.id,
        technician_id: m.technician_id,
        work_date: m.work_date,
        slot_id: m.slot_id,
        is_available: m.is_available,
        booking_id: m.booking_id,
        note: m.note,
        released_at: m.released_at,
        created_at: m.created_at,
    }
}

// ── Conditional writes (usable inside a transaction) ────────────

/// Flip a free row to occupied. Returns false if the row is missing or not free.
pub(crate) async fn claim_row<C: ConnectionTrait>(
    conn: &C,
    technician_id: i32,
    work_date: NaiveDate,
    slot_id: i32,
    booking_id: Option<i32>,
    note: Option<&str>,
) -> Result<bool, DbErr> {
    let mut update = technician_time_slot::Entity::update_many()
        .col_expr(technician_time_slot::Column::IsAvailable, Expr::value(false))
        .col_expr(technician_time_slot::Column::BookingId, Expr::value(booking_id));
    if let Some(note) = note {
        update = update.col_expr(
            technician_time_slot::Column::Note,
            Expr::value(note.to_string()),
        );
    }

    let result = update
        .filter(technician_time_slot::Column::TechnicianId.eq(technician_id))
        .filter(technician_time_slot::Column::WorkDate.eq(work_date))
        .filter(technician_time_slot::Column::SlotId.eq(slot_id))
        .filter(technician_time_slot::Column::IsAvailable.eq(true))
        .filter(technician_time_slot::Column::BookingId.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Free every row still occupied by `booking_id`. Returns the freed slot IDs.
pub(crate) async fn release_rows_for_booking<C: ConnectionTrait>(
    conn: &C,
    booking_id: i32,
) -> Result<Vec<i32>, DbErr> {
    let rows = technician_time_slot::Entity::find()
        .filter(technician_time_slot::Column::BookingId.eq(booking_id))
        .filter(technician_time_slot::Column::IsAvailable.eq(false))
        .order_by_asc(technician_time_slot::Column::SlotId)
        .all(conn)
        .await?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    technician_time_slot::Entity::update_many()
        .col_expr(technician_time_slot::Column::IsAvailable, Expr::value(true))
        .col_expr(
            technician_time_slot::Column::BookingId,
            Expr::value(Option::<i32>::None),
        )
        .col_expr(technician_time_slot::Column::ReleasedAt, Expr::value(Utc::now()))
        .filter(technician_time_slot::Column::BookingId.eq(booking_id))
        .filter(technician_time_slot::Column::IsAvailable.eq(false))
        .exec(conn)
        .await?;

    Ok(rows.into_iter().map(|r| r.slot_id).collect())
}

#[async_trait]
impl TechnicianSlotRepository for SeaOrmTechnicianSlotRepository {
    async fn generate_day(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_ids: &[i32],
    ) -> DomainResult<usize> {
        let existing: HashSet<i32> = technician_time_slot::Entity::find()
            .filter(technician_time_slot::Column::TechnicianId.eq(technician_id))
            .filter(technician_time_slot::Column::WorkDate.eq(work_date))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| r.slot_id)
            .collect();

        let now = Utc::now();
        let mut seen = HashSet::new();
        let missing: Vec<technician_time_slot::ActiveModel> = slot_ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id) && seen.insert(*id))
            .map(|slot_id| technician_time_slot::ActiveModel {
                technician_id: Set(technician_id),
                work_date: Set(work_date),
                slot_id: Set(slot_id),
                is_available: Set(true),
                booking_id: Set(None),
                note: Set(None),
                released_at: Set(None),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        let created = missing.len();
        if created > 0 {
            technician_time_slot::Entity::insert_many(missing)
                .exec(&self.db)
                .await
                .map_err(db_err)?;
        }

        debug!(technician_id, %work_date, created, "Generated technician calendar day");
        Ok(created)
    }

    async fn find(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
    ) -> DomainResult<Option<TechnicianTimeSlot>> {
        let model = technician_time_slot::Entity::find()
            .filter(technician_time_slot::Column::TechnicianId.eq(technician_id))
            .filter(technician_time_slot::Column::WorkDate.eq(work_date))
            .filter(technician_time_slot::Column::SlotId.eq(slot_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_technicians(
        &self,
        technician_ids: &[i32],
        work_date: NaiveDate,
    ) -> DomainResult<Vec<TechnicianTimeSlot>> {
        if technician_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = technician_time_slot::Entity::find()
            .filter(technician_time_slot::Column::TechnicianId.is_in(technician_ids.to_vec()))
            .filter(technician_time_slot::Column::WorkDate.eq(work_date))
            .order_by_asc(technician_time_slot::Column::TechnicianId)
            .order_by_asc(technician_time_slot::Column::SlotId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<TechnicianTimeSlot>> {
        let models = technician_time_slot::Entity::find()
            .filter(technician_time_slot::Column::BookingId.eq(booking_id))
            .order_by_asc(technician_time_slot::Column::SlotId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn reserve(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        booking_id: Option<i32>,
        note: Option<&str>,
    ) -> DomainResult<bool> {
        claim_row(&self.db, technician_id, work_date, slot_id, booking_id, note)
            .await
            .map_err(db_err)
    }

    async fn release(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        expected_booking_id: Option<i32>,
    ) -> DomainResult<bool> {
        let owner = match expected_booking_id {
            Some(booking_id) => technician_time_slot::Column::BookingId.eq(booking_id),
            None => technician_time_slot::Column::BookingId.is_null(),
        };

        let result = technician_time_slot::Entity::update_many()
            .col_expr(technician_time_slot::Column::IsAvailable, Expr::value(true))
            .col_expr(
                technician_time_slot::Column::BookingId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(technician_time_slot::Column::ReleasedAt, Expr::value(Utc::now()))
            .filter(technician_time_slot::Column::TechnicianId.eq(technician_id))
            .filter(technician_time_slot::Column::WorkDate.eq(work_date))
            .filter(technician_time_slot::Column::SlotId.eq(slot_id))
            .filter(technician_time_slot::Column::IsAvailable.eq(false))
            .filter(owner)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }
}
