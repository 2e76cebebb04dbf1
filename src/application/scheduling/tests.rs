use std::time::Duration;

use chrono::Weekday;

use super::*;
use crate::config::SchedulingConfig;
use crate::domain::{
    BookingStatus, CreateBookingRequest, CreateTimeSlotRequest, DomainError, HoldKey, HoldStore,
    SlotStatus,
};
use crate::test_support::{time, work_date, Fixture, CENTER_ID};

fn booking_request(
    customer_id: i32,
    technician_id: i32,
    start_slot_id: i32,
    service_ids: Vec<i32>,
) -> CreateBookingRequest {
    CreateBookingRequest {
        customer_id,
        vehicle_id: 500 + customer_id,
        center_id: CENTER_ID,
        technician_id,
        booking_date: work_date(),
        start_slot_id,
        service_ids,
        notes: None,
    }
}

fn created(outcome: BookingOutcome) -> crate::domain::Booking {
    match outcome {
        BookingOutcome::Created(booking) => booking,
        other => panic!("expected a booking, got {:?}", other),
    }
}

// ── Catalog ────────────────────────────────────────────────────

#[tokio::test]
async fn seeded_catalog_is_idempotent() {
    let fx = Fixture::new().await;
    let catalog = fx.catalog();

    assert_eq!(catalog.list_time_slots(true).await.unwrap().len(), 18);
    assert_eq!(
        catalog
            .seed_default_catalog(time("08:00"), time("17:00"))
            .await
            .unwrap(),
        0
    );
    assert_eq!(fx.slot_at("09:00").await.label, "09:00-09:30");
}

#[tokio::test]
async fn duplicate_slot_time_or_label_is_rejected() {
    let fx = Fixture::new().await;
    let catalog = fx.catalog();

    let same_time = catalog
        .create_time_slot(CreateTimeSlotRequest::new(time("08:00"), "early bird"))
        .await;
    assert!(matches!(same_time, Err(DomainError::Validation(_))));

    let same_label = catalog
        .create_time_slot(CreateTimeSlotRequest::new(time("07:30"), "08:00-08:30"))
        .await;
    assert!(matches!(same_label, Err(DomainError::Validation(_))));

    let blank = catalog
        .create_time_slot(CreateTimeSlotRequest::new(time("07:30"), "   "))
        .await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));

    let fresh = catalog
        .create_time_slot(CreateTimeSlotRequest::new(time("07:30"), "07:30-08:00"))
        .await
        .unwrap();
    assert!(fresh.is_active);
    assert_eq!(catalog.list_time_slots(false).await.unwrap().len(), 19);
}

#[tokio::test]
async fn deactivating_unknown_slot_is_not_found() {
    let fx = Fixture::new().await;
    let err = fx.catalog().set_time_slot_active(999, false).await;
    assert!(matches!(err, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn technician_day_covers_the_operating_window_only() {
    let fx = Fixture::new().await;
    fx.open_center(2, Weekday::Wed, "09:00", "12:00").await;
    let technician = fx
        .repos
        .technicians()
        .create(crate::domain::Technician {
            id: 0,
            center_id: 2,
            full_name: "Short day".into(),
            is_active: true,
            skills: vec![],
        })
        .await
        .unwrap();

    let created = fx
        .catalog()
        .generate_technician_day(technician.id, work_date())
        .await
        .unwrap();
    assert_eq!(created, 6);

    // running again creates nothing new
    let again = fx
        .catalog()
        .generate_technician_day(technician.id, work_date())
        .await
        .unwrap();
    assert_eq!(again, 0);
}

// ── Availability ───────────────────────────────────────────────

#[tokio::test]
async fn single_slot_service_sees_every_free_slot() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;

    let result = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[service.id])
        .await
        .unwrap();

    assert_eq!(result.slot_count, 1);
    assert_eq!(result.slots.len(), 18);
    assert!(result.slots.iter().all(|s| s.technician_ids == vec![technician.id]));
}

#[tokio::test]
async fn technician_below_required_level_is_excluded() {
    let fx = Fixture::new().await;
    let junior = fx.technician("Junior", &[(10, 2)]).await;
    let senior = fx.technician("Senior", &[(10, 3)]).await;
    let service = fx.service("Gearbox", 30, &[(10, 3)]).await;

    let result = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[service.id])
        .await
        .unwrap();

    for slot in &result.slots {
        assert_eq!(slot.technician_ids, vec![senior.id]);
        assert!(!slot.technician_ids.contains(&junior.id));
    }
}

#[tokio::test]
async fn multi_slot_service_needs_consecutive_free_slots() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Brakes", 60, &[]).await;
    let slot_4 = fx.slot_at("09:30").await;
    let last = fx.slot_at("16:30").await;

    fx.bookings()
        .block_time_slot(technician.id, work_date(), slot_4.id, "Training")
        .await
        .unwrap();

    let result = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[service.id])
        .await
        .unwrap();

    assert_eq!(result.slot_count, 2);
    let unavailable: Vec<i32> = result
        .slots
        .iter()
        .filter(|s| !s.is_available())
        .map(|s| s.slot_id)
        .collect();
    // 09:00 would run into the blocked 09:30, 09:30 is blocked, 16:30 overruns closing
    assert_eq!(unavailable, vec![fx.slot_at("09:00").await.id, slot_4.id, last.id]);
}

#[tokio::test]
async fn foreign_hold_hides_slot_but_holder_still_sees_it() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let slot = fx.slot_at("10:00").await;

    let key = HoldKey::new(CENTER_ID, work_date(), slot.id, technician.id);
    assert!(fx.bookings().hold_slot(key, 101).await.unwrap().granted);

    let anonymous = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[service.id])
        .await
        .unwrap();
    assert!(!anonymous.slot(slot.id).unwrap().is_available());

    let holder = fx
        .availability()
        .get_availability_for_customer(CENTER_ID, work_date(), &[service.id], 101)
        .await
        .unwrap();
    assert!(holder.slot(slot.id).unwrap().is_available());

    let other = fx
        .availability()
        .get_availability_for_customer(CENTER_ID, work_date(), &[service.id], 102)
        .await
        .unwrap();
    assert!(!other.slot(slot.id).unwrap().is_available());
}

#[tokio::test]
async fn slots_outside_the_operating_window_are_never_offered() {
    let fx = Fixture::new().await;
    fx.open_center(2, Weekday::Wed, "09:00", "12:00").await;
    let technician = fx.technician_at(2, "Short day", &[]).await;
    let oil = fx.service("Oil change", 30, &[]).await;
    let brakes = fx.service("Brakes", 60, &[]).await;

    // calendar rows outside the window exist but must stay invisible
    let mut outside = Vec::new();
    for start in ["08:00", "08:30", "12:00", "16:30"] {
        outside.push(fx.slot_at(start).await.id);
    }
    fx.repos
        .calendar()
        .generate_day(technician.id, work_date(), &outside)
        .await
        .unwrap();

    let mut inside = Vec::new();
    for start in ["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"] {
        inside.push(fx.slot_at(start).await.id);
    }

    let result = fx
        .availability()
        .get_availability(2, work_date(), &[oil.id])
        .await
        .unwrap();
    let listed: Vec<i32> = result.slots.iter().map(|s| s.slot_id).collect();
    assert_eq!(listed, inside);
    assert_eq!(result.available_slot_ids(), inside);
    assert!(result
        .slots
        .iter()
        .all(|s| s.slot_time >= time("09:00") && s.slot_time < time("12:00")));

    let times = fx
        .availability()
        .get_available_times(2, work_date(), None, &[oil.id])
        .await
        .unwrap();
    let offered: Vec<i32> = times.times.iter().map(|t| t.slot_id).collect();
    assert_eq!(offered, inside);
    assert!(offered.iter().all(|id| !outside.contains(id)));

    // a one hour job cannot start at 11:30 and run past closing
    let longer = fx
        .availability()
        .get_available_times(2, work_date(), Some(technician.id), &[brakes.id])
        .await
        .unwrap();
    let starts: Vec<i32> = longer.times.iter().map(|t| t.slot_id).collect();
    assert_eq!(starts, inside[..5].to_vec());
}

#[tokio::test]
async fn closed_day_is_empty_and_unknown_center_is_an_error() {
    let fx = Fixture::new().await;
    fx.technician("Ana", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let thursday = work_date().succ_opt().unwrap();

    let closed = fx
        .availability()
        .get_availability(CENTER_ID, thursday, &[service.id])
        .await
        .unwrap();
    assert!(closed.is_closed());

    let unknown = fx
        .availability()
        .get_availability(42, work_date(), &[service.id])
        .await;
    assert!(matches!(unknown, Err(DomainError::NotFound { entity: "Center", .. })));
}

#[tokio::test]
async fn unknown_or_missing_services_are_input_errors() {
    let fx = Fixture::new().await;

    let none = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[])
        .await;
    assert!(matches!(none, Err(DomainError::Validation(_))));

    let unknown = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[77])
        .await;
    assert!(matches!(unknown, Err(DomainError::NotFound { entity: "Service", .. })));
}

#[tokio::test]
async fn available_times_can_be_narrowed_to_one_technician() {
    let fx = Fixture::new().await;
    let ana = fx.technician("Ana", &[]).await;
    let ben = fx.technician("Ben", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let slot = fx.slot_at("08:00").await;

    fx.bookings()
        .block_time_slot(ana.id, work_date(), slot.id, "Late start")
        .await
        .unwrap();

    let all = fx
        .availability()
        .get_available_times(CENTER_ID, work_date(), None, &[service.id])
        .await
        .unwrap();
    assert_eq!(all.times.len(), 18);
    assert_eq!(all.technicians.len(), 2);

    let only_ana = fx
        .availability()
        .get_available_times(CENTER_ID, work_date(), Some(ana.id), &[service.id])
        .await
        .unwrap();
    assert_eq!(only_ana.times.len(), 17);
    assert!(only_ana.times.iter().all(|t| t.slot_id != slot.id));
    assert_eq!(only_ana.technicians.len(), 1);
    assert_eq!(only_ana.technicians[0].technician_id, ana.id);

    let ben_times = fx
        .availability()
        .get_available_times(CENTER_ID, work_date(), Some(ben.id), &[service.id])
        .await
        .unwrap();
    assert_eq!(ben_times.times.first().map(|t| t.slot_id), Some(slot.id));

    let without_services = fx
        .availability()
        .get_available_times(CENTER_ID, work_date(), Some(ana.id), &[])
        .await
        .unwrap();
    assert_eq!(without_services.slot_count, 1);
    assert_eq!(without_services.times.len(), 17);

    let unknown = fx
        .availability()
        .get_available_times(CENTER_ID, work_date(), Some(999), &[service.id])
        .await;
    assert!(matches!(unknown, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn inactive_slots_are_not_offered() {
    let fx = Fixture::new().await;
    fx.technician("Ana", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let slot = fx.slot_at("12:00").await;

    fx.catalog().set_time_slot_active(slot.id, false).await.unwrap();

    let result = fx
        .availability()
        .get_availability(CENTER_ID, work_date(), &[service.id])
        .await
        .unwrap();
    assert_eq!(result.slots.len(), 17);
    assert!(result.slot(slot.id).is_none());
}

// ── Holds through the orchestrator ─────────────────────────────

#[tokio::test]
async fn second_customer_is_denied_a_held_slot() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let slot = fx.slot_at("09:00").await;
    let key = HoldKey::new(CENTER_ID, work_date(), slot.id, technician.id);
    let bookings = fx.bookings();

    let first = bookings.hold_slot(key, 101).await.unwrap();
    assert!(first.granted);
    let second = bookings.hold_slot(key, 102).await.unwrap();
    assert!(!second.granted);
    assert_eq!(second.expires_at, first.expires_at);

    assert!(!bookings.release_slot_hold(key, 102).await.unwrap());
    assert!(bookings.release_slot_hold(key, 101).await.unwrap());
    assert!(bookings.hold_slot(key, 102).await.unwrap().granted);
}

#[tokio::test]
async fn hold_lapses_after_ttl() {
    let fx = Fixture::with_config(SchedulingConfig {
        slot_minutes: 30,
        hold_ttl: Duration::from_millis(50),
        sweep_interval: Duration::from_secs(60),
    })
    .await;
    let technician = fx.technician("Ana", &[]).await;
    let slot = fx.slot_at("09:00").await;
    let key = HoldKey::new(CENTER_ID, work_date(), slot.id, technician.id);

    assert!(fx.bookings().hold_slot(key, 101).await.unwrap().granted);
    assert!(fx.holds.is_held(key).await.unwrap());

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(!fx.holds.is_held(key).await.unwrap());
    assert!(fx.bookings().hold_slot(key, 102).await.unwrap().granted);
}

#[tokio::test]
async fn selection_hold_is_all_or_nothing() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Brakes", 90, &[]).await;
    let start = fx.slot_at("10:00").await;
    let middle = fx.slot_at("10:30").await;

    let blocker = HoldKey::new(CENTER_ID, work_date(), middle.id, technician.id);
    assert!(fx.bookings().hold_slot(blocker, 202).await.unwrap().granted);

    let selection = SlotSelection {
        center_id: CENTER_ID,
        date: work_date(),
        technician_id: technician.id,
        start_slot_id: start.id,
        service_ids: vec![service.id],
    };
    let denied = fx.bookings().hold_selection(&selection, 101).await.unwrap();
    assert!(!denied.granted);
    assert_eq!(denied.blocked_slot_id, Some(middle.id));
    assert_eq!(denied.slot_ids.len(), 3);
    // the first slot, taken before the conflict, was given back
    let first_key = HoldKey::new(CENTER_ID, work_date(), start.id, technician.id);
    assert!(!fx.holds.is_held(first_key).await.unwrap());

    fx.bookings().release_slot_hold(blocker, 202).await.unwrap();
    let granted = fx.bookings().hold_selection(&selection, 101).await.unwrap();
    assert!(granted.granted);
    assert_eq!(fx.holds.holds_for(CENTER_ID, work_date()).await.unwrap().len(), 3);

    assert_eq!(fx.bookings().release_selection(&selection, 101).await.unwrap(), 3);
    assert!(fx.holds.holds_for(CENTER_ID, work_date()).await.unwrap().is_empty());
}

// ── Calendar rows ──────────────────────────────────────────────

#[tokio::test]
async fn reserve_and_release_follow_the_slot_state_machine() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let slot = fx.slot_at("11:00").await;
    let bookings = fx.bookings();

    assert!(bookings
        .reserve_time_slot(technician.id, work_date(), slot.id, None)
        .await
        .unwrap());
    assert_eq!(fx.status(technician.id, slot.id).await, SlotStatus::Reserved);

    // occupied: a normal negative answer
    assert!(!bookings
        .reserve_time_slot(technician.id, work_date(), slot.id, None)
        .await
        .unwrap());

    let mut events = fx.events.subscribe();
    assert!(bookings
        .release_time_slot(technician.id, work_date(), slot.id)
        .await
        .unwrap());
    let released = events.try_recv().unwrap();
    assert_eq!(released.event.event_type(), "slots_released");
    assert_eq!(released.event.center_id(), CENTER_ID);

    let freed = fx.row(technician.id, slot.id).await;
    assert_eq!(freed.status(), SlotStatus::Available);
    assert!(freed.was_released());

    // releasing a free row is an invariant violation
    let err = bookings
        .release_time_slot(technician.id, work_date(), slot.id)
        .await
        .unwrap_err();
    assert!(err.is_invariant_violation());

    // released rows can be taken again
    assert!(bookings
        .reserve_time_slot(technician.id, work_date(), slot.id, None)
        .await
        .unwrap());
}

#[tokio::test]
async fn reserving_a_missing_row_is_not_found() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let slot = fx.slot_at("11:00").await;
    let other_day = work_date().succ_opt().unwrap();

    let err = fx
        .bookings()
        .reserve_time_slot(technician.id, other_day, slot.id, None)
        .await;
    assert!(matches!(err, Err(DomainError::NotFound { .. })));

    let err = fx
        .bookings()
        .reserve_time_slot(technician.id, work_date(), slot.id, Some(999))
        .await;
    assert!(matches!(err, Err(DomainError::NotFound { entity: "Booking", .. })));
}

#[tokio::test]
async fn reserving_for_a_booking_requires_a_live_matching_booking() {
    let fx = Fixture::new().await;
    let ana = fx.technician("Ana", &[]).await;
    let ben = fx.technician("Ben", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let bookings = fx.bookings();
    let start = fx.slot_at("09:00").await;
    let extra = fx.slot_at("11:00").await;

    let booking = created(
        bookings
            .create_booking(booking_request(101, ana.id, start.id, vec![service.id]))
            .await
            .unwrap(),
    );

    let wrong_technician = bookings
        .reserve_time_slot(ben.id, work_date(), extra.id, Some(booking.id))
        .await;
    assert!(matches!(wrong_technician, Err(DomainError::Validation(_))));

    let wrong_day = bookings
        .reserve_time_slot(ana.id, work_date().succ_opt().unwrap(), extra.id, Some(booking.id))
        .await;
    assert!(matches!(wrong_day, Err(DomainError::Validation(_))));
    assert_eq!(fx.status(ben.id, extra.id).await, SlotStatus::Available);

    assert!(bookings
        .reserve_time_slot(ana.id, work_date(), extra.id, Some(booking.id))
        .await
        .unwrap());
    assert_eq!(fx.status(ana.id, extra.id).await, SlotStatus::Assigned);

    bookings.cancel_booking(booking.id).await.unwrap();
    let later = fx.slot_at("13:00").await;
    let cancelled = bookings
        .reserve_time_slot(ana.id, work_date(), later.id, Some(booking.id))
        .await;
    assert!(matches!(cancelled, Err(DomainError::Validation(_))));
    assert_eq!(fx.status(ana.id, later.id).await, SlotStatus::Available);
}

// ── Bookings ───────────────────────────────────────────────────

#[tokio::test]
async fn booking_assigns_its_whole_span() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[(10, 3)]).await;
    let service = fx.service("Brakes", 60, &[(10, 2)]).await;
    let slot_3 = fx.slot_at("09:00").await;
    let slot_4 = fx.slot_at("09:30").await;
    let mut events = fx.events.subscribe();

    let booking = created(
        fx.bookings()
            .create_booking(booking_request(101, technician.id, slot_3.id, vec![service.id]))
            .await
            .unwrap(),
    );

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.slot_ids, vec![slot_3.id, slot_4.id]);
    assert_eq!(fx.status(technician.id, slot_3.id).await, SlotStatus::Assigned);
    assert_eq!(fx.status(technician.id, slot_4.id).await, SlotStatus::Assigned);
    assert!(fx.holds.is_empty());

    let rows = fx.repos.calendar().find_for_booking(booking.id).await.unwrap();
    assert_eq!(rows.len(), 2);

    let message = events.try_recv().unwrap();
    assert_eq!(message.event.event_type(), "booking_created");
}

#[tokio::test]
async fn taken_slot_fails_the_whole_booking() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Brakes", 60, &[]).await;
    let slot_3 = fx.slot_at("09:00").await;
    let slot_4 = fx.slot_at("09:30").await;

    assert!(fx
        .bookings()
        .reserve_time_slot(technician.id, work_date(), slot_4.id, None)
        .await
        .unwrap());

    let outcome = fx
        .bookings()
        .create_booking(booking_request(101, technician.id, slot_3.id, vec![service.id]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        BookingOutcome::SlotUnavailable {
            slot_id: slot_4.id,
            reason: Unavailability::AlreadyTaken,
        }
    );
    assert_eq!(fx.status(technician.id, slot_3.id).await, SlotStatus::Available);
    assert!(fx.bookings().list_customer_bookings(101).await.unwrap().is_empty());
    assert!(fx.holds.is_empty());
}

#[tokio::test]
async fn slot_held_by_another_customer_blocks_booking() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let slot = fx.slot_at("14:00").await;
    let key = HoldKey::new(CENTER_ID, work_date(), slot.id, technician.id);

    assert!(fx.bookings().hold_slot(key, 202).await.unwrap().granted);

    let outcome = fx
        .bookings()
        .create_booking(booking_request(101, technician.id, slot.id, vec![service.id]))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        BookingOutcome::SlotUnavailable {
            reason: Unavailability::HeldByAnotherCustomer,
            ..
        }
    ));
    assert_eq!(fx.status(technician.id, slot.id).await, SlotStatus::Available);
    // the other customer's hold is untouched
    assert_eq!(fx.holds.holder(key).await.unwrap().unwrap().customer_id, 202);

    // the holder can book it, and the hold goes away
    let booking = created(
        fx.bookings()
            .create_booking(booking_request(202, technician.id, slot.id, vec![service.id]))
            .await
            .unwrap(),
    );
    assert_eq!(booking.customer_id, 202);
    assert!(!fx.holds.is_held(key).await.unwrap());
}

#[tokio::test]
async fn unqualified_technician_cannot_be_booked() {
    let fx = Fixture::new().await;
    let junior = fx.technician("Junior", &[(10, 2)]).await;
    let service = fx.service("Gearbox", 30, &[(10, 3)]).await;
    let slot = fx.slot_at("09:00").await;

    let err = fx
        .bookings()
        .create_booking(booking_request(101, junior.id, slot.id, vec![service.id]))
        .await;
    assert!(matches!(err, Err(DomainError::Validation(_))));
    assert_eq!(fx.status(junior.id, slot.id).await, SlotStatus::Available);
}

#[tokio::test]
async fn span_past_closing_time_is_rejected() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Brakes", 60, &[]).await;
    let last = fx.slot_at("16:30").await;

    let err = fx
        .bookings()
        .create_booking(booking_request(101, technician.id, last.id, vec![service.id]))
        .await;
    assert!(matches!(err, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn invalid_request_is_rejected_before_any_lookup() {
    let fx = Fixture::new().await;
    let request = booking_request(0, 1, 1, vec![]);

    let err = fx.bookings().create_booking(request).await;
    assert!(matches!(err, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn concurrent_bookings_for_one_span_commit_once() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Brakes", 60, &[]).await;
    let slot = fx.slot_at("13:00").await;
    let first = fx.bookings();
    let second = fx.bookings();

    let (a, b) = tokio::join!(
        first.create_booking(booking_request(101, technician.id, slot.id, vec![service.id])),
        second.create_booking(booking_request(102, technician.id, slot.id, vec![service.id])),
    );

    let outcomes = [a.unwrap(), b.unwrap()];
    let winners = outcomes.iter().filter(|o| o.booking().is_some()).count();
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn booking_walks_the_lifecycle() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Oil change", 30, &[]).await;
    let slot = fx.slot_at("08:00").await;
    let bookings = fx.bookings();

    let booking = created(
        bookings
            .create_booking(booking_request(101, technician.id, slot.id, vec![service.id]))
            .await
            .unwrap(),
    );

    let skip = bookings
        .update_booking_status(booking.id, BookingStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(skip, DomainError::InvalidTransition { .. }));

    for status in [
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Paid,
    ] {
        let updated = bookings.update_booking_status(booking.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }

    // PAID is terminal
    let err = bookings.cancel_booking(booking.id).await.unwrap_err();
    assert!(err.is_invariant_violation());
    assert_eq!(fx.status(technician.id, slot.id).await, SlotStatus::Assigned);
}

#[tokio::test]
async fn cancelling_releases_every_assigned_slot() {
    let fx = Fixture::new().await;
    let technician = fx.technician("Ana", &[]).await;
    let service = fx.service("Brakes", 60, &[]).await;
    let slot_3 = fx.slot_at("09:00").await;
    let slot_4 = fx.slot_at("09:30").await;
    let bookings = fx.bookings();

    let booking = created(
        bookings
            .create_booking(booking_request(101, technician.id, slot_3.id, vec![service.id]))
            .await
            .unwrap(),
    );
    bookings
        .update_booking_status(booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();

    let mut events = fx.events.subscribe();
    let cancelled = bookings.cancel_booking(booking.id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    for slot in [&slot_3, &slot_4] {
        let row = fx.row(technician.id, slot.id).await;
        assert_eq!(row.status(), SlotStatus::Available);
        assert_eq!(row.booking_id, None);
        assert!(row.was_released());
    }

    assert_eq!(
        events.try_recv().unwrap().event.event_type(),
        "booking_status_changed"
    );
    assert_eq!(events.try_recv().unwrap().event.event_type(), "slots_released");

    // the span is bookable again
    let rebooked = bookings
        .create_booking(booking_request(102, technician.id, slot_3.id, vec![service.id]))
        .await
        .unwrap();
    assert!(rebooked.booking().is_some());

    // CANCELLED is terminal
    let err = bookings
        .update_booking_status(booking.id, BookingStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
}

#[tokio::test]
async fn unknown_booking_is_not_found() {
    let fx = Fixture::new().await;
    let err = fx.bookings().get_booking(404).await;
    assert!(matches!(err, Err(DomainError::NotFound { entity: "Booking", .. })));
}
