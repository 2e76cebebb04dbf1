//! Booking orchestrator
//!
//! Coordinates holds, calendar rows and bookings. Losing a race for a
//! slot is a normal outcome (`Ok(false)` or `BookingOutcome::SlotUnavailable`);
//! only input errors, invariant violations and storage failures are `Err`.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use validator::Validate;

use super::planning::{self, PlannedSpan, SlotSelection};
use crate::config::SchedulingConfig;
use crate::domain::{
    Booking, BookingStatus, CreateBookingRequest, DomainError, DomainResult, HoldKey,
    HoldOutcome, HoldStore, NewBooking, RepositoryProvider, SpanCommit, Technician,
    TechnicianTimeSlot,
};
use crate::notifications::{
    BookingCreatedEvent, BookingStatusChangedEvent, Event, HoldReleasedEvent, SharedEventBus,
    SlotHeldEvent, SlotsReleasedEvent,
};

/// Why a slot of the requested span could not be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailability {
    /// Another customer holds it
    HeldByAnotherCustomer,
    /// The calendar row is no longer free
    AlreadyTaken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Created(Booking),
    /// Nothing was written; the customer should pick another time
    SlotUnavailable {
        slot_id: i32,
        reason: Unavailability,
    },
}

impl BookingOutcome {
    pub fn booking(&self) -> Option<&Booking> {
        match self {
            BookingOutcome::Created(booking) => Some(booking),
            BookingOutcome::SlotUnavailable { .. } => None,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            BookingOutcome::Created(_) => "Booking created",
            BookingOutcome::SlotUnavailable { .. } => {
                "The selected time is no longer available, please pick another time"
            }
        }
    }
}

/// Result of holding every slot of a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionHold {
    pub granted: bool,
    pub slot_ids: Vec<i32>,
    /// First slot that could not be held
    pub blocked_slot_id: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    holds: Arc<dyn HoldStore>,
    events: SharedEventBus,
    config: SchedulingConfig,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        holds: Arc<dyn HoldStore>,
        events: SharedEventBus,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            repos,
            holds,
            events,
            config,
        }
    }

    // ── Holds ──────────────────────────────────────────────────

    /// Hold one slot for `customer_id` using the configured TTL
    pub async fn hold_slot(&self, key: HoldKey, customer_id: i32) -> DomainResult<HoldOutcome> {
        let outcome = self.holds.try_hold(key, customer_id, self.config.hold_ttl).await?;
        if outcome.granted {
            self.events.publish(Event::SlotHeld(SlotHeldEvent {
                center_id: key.center_id,
                date: key.date,
                technician_id: key.technician_id,
                slot_ids: vec![key.slot_id],
                customer_id,
                expires_at: outcome.expires_at,
            }));
        }
        Ok(outcome)
    }

    pub async fn release_slot_hold(&self, key: HoldKey, customer_id: i32) -> DomainResult<bool> {
        let released = self.holds.release(key, customer_id).await?;
        if released {
            self.events.publish(Event::HoldReleased(HoldReleasedEvent {
                center_id: key.center_id,
                date: key.date,
                technician_id: key.technician_id,
                slot_ids: vec![key.slot_id],
                customer_id,
            }));
        }
        Ok(released)
    }

    /// Hold every slot the selection spans, or none of them.
    pub async fn hold_selection(
        &self,
        selection: &SlotSelection,
        customer_id: i32,
    ) -> DomainResult<SelectionHold> {
        let planned = self.plan(selection).await?;
        let keys = hold_keys(&planned);
        let mut acquired = Vec::with_capacity(keys.len());
        let mut expires_at = None;

        for key in &keys {
            let outcome = self.holds.try_hold(*key, customer_id, self.config.hold_ttl).await?;
            if outcome.granted {
                acquired.push(*key);
            } else {
                // A live hold of the same customer counts as held.
                let ours = self
                    .holds
                    .holder(*key)
                    .await?
                    .is_some_and(|hold| hold.customer_id == customer_id);
                if !ours {
                    for taken in &acquired {
                        self.holds.release(*taken, customer_id).await?;
                    }
                    debug!(
                        customer_id,
                        technician_id = key.technician_id,
                        slot_id = key.slot_id,
                        "Selection hold denied"
                    );
                    return Ok(SelectionHold {
                        granted: false,
                        slot_ids: planned.span.slot_ids.clone(),
                        blocked_slot_id: Some(key.slot_id),
                        expires_at: None,
                    });
                }
            }
            // the selection lapses with its earliest hold
            expires_at = Some(expires_at.map_or(outcome.expires_at, |earliest: DateTime<Utc>| {
                earliest.min(outcome.expires_at)
            }));
        }

        info!(
            customer_id,
            center_id = selection.center_id,
            technician_id = selection.technician_id,
            slots = ?planned.span.slot_ids,
            "Selection held"
        );
        if let Some(expires_at) = expires_at {
            self.events.publish(Event::SlotHeld(SlotHeldEvent {
                center_id: selection.center_id,
                date: selection.date,
                technician_id: selection.technician_id,
                slot_ids: planned.span.slot_ids.clone(),
                customer_id,
                expires_at,
            }));
        }

        Ok(SelectionHold {
            granted: true,
            slot_ids: planned.span.slot_ids,
            blocked_slot_id: None,
            expires_at,
        })
    }

    /// Drop the customer's holds on the selection. Returns how many were released.
    pub async fn release_selection(
        &self,
        selection: &SlotSelection,
        customer_id: i32,
    ) -> DomainResult<usize> {
        let planned = self.plan(selection).await?;
        let released = self.release_holds(&hold_keys(&planned), customer_id).await?;
        if released > 0 {
            self.events.publish(Event::HoldReleased(HoldReleasedEvent {
                center_id: selection.center_id,
                date: selection.date,
                technician_id: selection.technician_id,
                slot_ids: planned.span.slot_ids,
                customer_id,
            }));
        }
        Ok(released)
    }

    // ── Calendar rows ──────────────────────────────────────────

    /// Take one free calendar row, optionally for an existing booking.
    ///
    /// `Ok(false)` when the row is already Reserved or Assigned. A booking
    /// must be live and belong to the same technician and day.
    pub async fn reserve_time_slot(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        booking_id: Option<i32>,
    ) -> DomainResult<bool> {
        if let Some(booking_id) = booking_id {
            let booking = self
                .repos
                .bookings()
                .find_by_id(booking_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;
            if booking.status.is_terminal() {
                return Err(DomainError::Validation(format!(
                    "booking {} is {} and cannot take slots",
                    booking.id, booking.status
                )));
            }
            if booking.technician_id != technician_id || booking.booking_date != work_date {
                return Err(DomainError::Validation(format!(
                    "booking {} is for technician {} on {}",
                    booking.id, booking.technician_id, booking.booking_date
                )));
            }
        }
        self.claim(technician_id, work_date, slot_id, booking_id, None)
            .await
    }

    /// Take a free calendar row out of the pool without a booking,
    /// e.g. for a break or training.
    pub async fn block_time_slot(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        note: &str,
    ) -> DomainResult<bool> {
        let note = note.trim();
        if note.is_empty() || note.chars().count() > 200 {
            return Err(DomainError::Validation(
                "block note must be 1 to 200 characters".into(),
            ));
        }
        self.claim(technician_id, work_date, slot_id, None, Some(note))
            .await
    }

    /// Return an Assigned or Reserved row to the pool.
    ///
    /// Releasing a row that is already free is an invariant violation.
    /// `Ok(false)` when another writer changed the row in between.
    pub async fn release_time_slot(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
    ) -> DomainResult<bool> {
        let row = self.find_row(technician_id, work_date, slot_id).await?;
        let technician = self.find_technician(technician_id).await?;
        let status = row.status();
        if !status.is_releasable() {
            return Err(DomainError::InvalidSlotState {
                technician_id,
                work_date,
                slot_id,
                status: status.to_string(),
            });
        }

        let released = self
            .repos
            .calendar()
            .release(technician_id, work_date, slot_id, row.booking_id)
            .await?;

        if released {
            info!(technician_id, %work_date, slot_id, booking_id = ?row.booking_id, "Slot released");
            self.events.publish(Event::SlotsReleased(SlotsReleasedEvent {
                center_id: technician.center_id,
                technician_id,
                work_date,
                slot_ids: vec![slot_id],
                booking_id: row.booking_id,
            }));
        } else {
            debug!(technician_id, %work_date, slot_id, "Slot changed before release");
        }
        Ok(released)
    }

    // ── Bookings ───────────────────────────────────────────────

    /// Create a PENDING booking and assign every slot of its span in one
    /// transaction. Either all slots are assigned or nothing changes.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> DomainResult<BookingOutcome> {
        request.validate()?;

        let selection = SlotSelection {
            center_id: request.center_id,
            date: request.booking_date,
            technician_id: request.technician_id,
            start_slot_id: request.start_slot_id,
            service_ids: request.service_ids.clone(),
        };
        let planned = self.plan(&selection).await?;
        let keys = hold_keys(&planned);
        let customer_id = request.customer_id;

        // Every slot must be held by this customer before the commit.
        for key in &keys {
            let owned = match self.holds.holder(*key).await? {
                Some(hold) => hold.customer_id == customer_id,
                None => {
                    self.holds
                        .try_hold(*key, customer_id, self.config.hold_ttl)
                        .await?
                        .granted
                }
            };
            if !owned {
                self.release_holds(&keys, customer_id).await?;
                return Ok(self.unavailable(key.slot_id, Unavailability::HeldByAnotherCustomer));
            }
        }

        let new_booking = NewBooking {
            customer_id,
            vehicle_id: request.vehicle_id,
            center_id: request.center_id,
            service_ids: planned.services.service_ids.clone(),
            notes: request.notes.clone(),
        };
        let committed = self
            .repos
            .bookings()
            .create_with_span(new_booking, &planned.span)
            .await;

        // Holds have served their purpose whatever the commit did.
        if let Err(e) = self.release_holds(&keys, customer_id).await {
            warn!(error = %e, customer_id, "Failed to release booking holds");
        }

        match committed? {
            SpanCommit::Committed(booking) => {
                metrics::counter!("scheduling_bookings_total", "outcome" => "created").increment(1);
                info!(
                    booking_id = booking.id,
                    customer_id,
                    center_id = booking.center_id,
                    technician_id = booking.technician_id,
                    date = %booking.booking_date,
                    slots = ?booking.slot_ids,
                    "Booking created"
                );
                self.events.publish(Event::BookingCreated(BookingCreatedEvent {
                    booking_id: booking.id,
                    customer_id,
                    center_id: booking.center_id,
                    technician_id: booking.technician_id,
                    booking_date: booking.booking_date,
                    slot_ids: booking.slot_ids.clone(),
                    timestamp: booking.created_at,
                }));
                Ok(BookingOutcome::Created(booking))
            }
            SpanCommit::SlotTaken { slot_id } => {
                Ok(self.unavailable(slot_id, Unavailability::AlreadyTaken))
            }
        }
    }

    /// Advance a booking along its lifecycle. Moving to CANCELLED releases
    /// its slots as well.
    pub async fn update_booking_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        let current = self.get_booking(booking_id).await?;
        if !current.status.can_transition_to(status) {
            return Err(DomainError::InvalidTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        if status == BookingStatus::Cancelled {
            return self.cancel_from(current).await;
        }

        let updated = self
            .repos
            .bookings()
            .update_status(booking_id, current.status, status)
            .await?
            .ok_or_else(|| concurrent_change(booking_id))?;

        info!(booking_id, from = %current.status, to = %status, "Booking status changed");
        self.publish_status_change(&updated, current.status);
        Ok(updated)
    }

    pub async fn cancel_booking(&self, booking_id: i32) -> DomainResult<Booking> {
        self.update_booking_status(booking_id, BookingStatus::Cancelled)
            .await
    }

    pub async fn get_booking(&self, booking_id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))
    }

    pub async fn list_customer_bookings(&self, customer_id: i32) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_for_customer(customer_id).await
    }

    // ── Internals ──────────────────────────────────────────────

    async fn plan(&self, selection: &SlotSelection) -> DomainResult<PlannedSpan> {
        planning::plan_selection(self.repos.as_ref(), selection, self.config.slot_minutes).await
    }

    async fn find_row(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
    ) -> DomainResult<TechnicianTimeSlot> {
        self.repos
            .calendar()
            .find(technician_id, work_date, slot_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    "TechnicianTimeSlot",
                    "technician/date/slot",
                    format!("{}/{}/{}", technician_id, work_date, slot_id),
                )
            })
    }

    async fn find_technician(&self, technician_id: i32) -> DomainResult<Technician> {
        self.repos
            .technicians()
            .find_by_id(technician_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Technician", "id", technician_id))
    }

    async fn claim(
        &self,
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        booking_id: Option<i32>,
        note: Option<&str>,
    ) -> DomainResult<bool> {
        let claimed = self
            .repos
            .calendar()
            .reserve(technician_id, work_date, slot_id, booking_id, note)
            .await?;

        if !claimed {
            // Distinguish a missing row from a lost race.
            self.find_row(technician_id, work_date, slot_id).await?;
        }

        let label = if claimed { "reserved" } else { "unavailable" };
        metrics::counter!("scheduling_slot_reservations_total", "outcome" => label).increment(1);
        debug!(technician_id, %work_date, slot_id, ?booking_id, outcome = label, "Slot reservation");
        Ok(claimed)
    }

    async fn release_holds(&self, keys: &[HoldKey], customer_id: i32) -> DomainResult<usize> {
        let mut released = 0;
        for key in keys {
            if self.holds.release(*key, customer_id).await? {
                released += 1;
            }
        }
        Ok(released)
    }

    async fn cancel_from(&self, current: Booking) -> DomainResult<Booking> {
        let (cancelled, released) = self
            .repos
            .bookings()
            .cancel(current.id, current.status)
            .await?
            .ok_or_else(|| concurrent_change(current.id))?;

        info!(
            booking_id = cancelled.id,
            from = %current.status,
            released = ?released,
            "Booking cancelled"
        );
        self.publish_status_change(&cancelled, current.status);
        if !released.is_empty() {
            self.events.publish(Event::SlotsReleased(SlotsReleasedEvent {
                center_id: cancelled.center_id,
                technician_id: cancelled.technician_id,
                work_date: cancelled.booking_date,
                slot_ids: released,
                booking_id: Some(cancelled.id),
            }));
        }
        Ok(cancelled)
    }

    fn publish_status_change(&self, booking: &Booking, from: BookingStatus) {
        self.events
            .publish(Event::BookingStatusChanged(BookingStatusChangedEvent {
                booking_id: booking.id,
                center_id: booking.center_id,
                from,
                to: booking.status,
                timestamp: booking.updated_at,
            }));
    }

    fn unavailable(&self, slot_id: i32, reason: Unavailability) -> BookingOutcome {
        metrics::counter!("scheduling_bookings_total", "outcome" => "slot_unavailable").increment(1);
        info!(slot_id, ?reason, "Booking rejected, slot unavailable");
        BookingOutcome::SlotUnavailable { slot_id, reason }
    }
}

fn hold_keys(planned: &PlannedSpan) -> Vec<HoldKey> {
    planned
        .span
        .slot_ids
        .iter()
        .map(|&slot_id| {
            HoldKey::new(
                planned.window.center_id,
                planned.span.work_date,
                slot_id,
                planned.span.technician_id,
            )
        })
        .collect()
}

fn concurrent_change(booking_id: i32) -> DomainError {
    DomainError::Conflict(format!("booking {} was changed concurrently", booking_id))
}
