//! SeaORM implementation of BookingRepository
//!
//! Booking writes that touch the calendar run in one transaction so a
//! booking never exists with only part of its span claimed.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::db_err;
use super::technician_slot_repository::{claim_row, release_rows_for_booking};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus, NewBooking, SpanCommit};
use crate::domain::calendar::SlotSpan;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn encode_ids(ids: &[i32]) -> DomainResult<String> {
    serde_json::to_string(ids).map_err(|e| DomainError::Storage(format!("encode ids: {}", e)))
}

fn decode_ids(raw: &str) -> DomainResult<Vec<i32>> {
    serde_json::from_str(raw).map_err(|e| DomainError::Storage(format!("decode ids: {}", e)))
}

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("booking {} has unknown status {}", m.id, m.status))
    })?;

    Ok(Booking {
        id: m.id,
        customer_id: m.customer_id,
        vehicle_id: m.vehicle_id,
        center_id: m.center_id,
        technician_id: m.technician_id,
        service_ids: decode_ids(&m.service_ids)?,
        booking_date: m.booking_date,
        slot_ids: decode_ids(&m.slot_ids)?,
        status,
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

/// Compare-and-set on the status column
async fn swap_status<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<bool, DbErr> {
    let result = booking::Entity::update_many()
        .col_expr(booking::Column::Status, Expr::value(to.as_str()))
        .col_expr(booking::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(booking::Column::Id.eq(id))
        .filter(booking::Column::Status.eq(from.as_str()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create_with_span(
        &self,
        new: NewBooking,
        span: &SlotSpan,
    ) -> DomainResult<SpanCommit> {
        let now = Utc::now();
        let model = booking::ActiveModel {
            customer_id: Set(new.customer_id),
            vehicle_id: Set(new.vehicle_id),
            center_id: Set(new.center_id),
            technician_id: Set(span.technician_id),
            service_ids: Set(encode_ids(&new.service_ids)?),
            booking_date: Set(span.work_date),
            slot_ids: Set(encode_ids(&span.slot_ids)?),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await.map_err(db_err)?;
        let saved = model.insert(&txn).await.map_err(db_err)?;

        for &slot_id in &span.slot_ids {
            let claimed = claim_row(
                &txn,
                span.technician_id,
                span.work_date,
                slot_id,
                Some(saved.id),
                None,
            )
            .await
            .map_err(db_err)?;

            if !claimed {
                txn.rollback().await.map_err(db_err)?;
                debug!(
                    technician_id = span.technician_id,
                    work_date = %span.work_date,
                    slot_id,
                    "Slot no longer free, booking rolled back"
                );
                return Ok(SpanCommit::SlotTaken { slot_id });
            }
        }

        txn.commit().await.map_err(db_err)?;
        info!(
            booking_id = saved.id,
            technician_id = span.technician_id,
            slots = ?span.slot_ids,
            "Booking committed"
        );
        Ok(SpanCommit::Committed(model_to_domain(saved)?))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_for_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::CustomerId.eq(customer_id))
            .order_by_desc(booking::Column::BookingDate)
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update_status(
        &self,
        id: i32,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<Option<Booking>> {
        if !swap_status(&self.db, id, from, to).await.map_err(db_err)? {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn cancel(
        &self,
        id: i32,
        from: BookingStatus,
    ) -> DomainResult<Option<(Booking, Vec<i32>)>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        if !swap_status(&txn, id, from, BookingStatus::Cancelled)
            .await
            .map_err(db_err)?
        {
            txn.rollback().await.map_err(db_err)?;
            return Ok(None);
        }

        let released = release_rows_for_booking(&txn, id).await.map_err(db_err)?;
        let model = booking::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;

        txn.commit().await.map_err(db_err)?;
        Ok(Some((model_to_domain(model)?, released)))
    }
}
