//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    InProgress,
    Completed,
    Paid,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::CheckedIn,
        Self::InProgress,
        Self::Completed,
        Self::Paid,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::CheckedIn => "CHECKED_IN",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Strict parse; storage only ever holds the enumerated values
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// The forward step of the happy path, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::CheckedIn),
            Self::CheckedIn => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => Some(Self::Paid),
            Self::Paid | Self::Cancelled => None,
        }
    }

    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == Self::Cancelled || self.next() == Some(target)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer's appointment occupying one technician over a slot span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub center_id: i32,
    pub technician_id: i32,
    pub service_ids: Vec<i32>,
    pub booking_date: NaiveDate,
    /// Calendar slots occupied, in time order
    pub slot_ids: Vec<i32>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a booking about to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub center_id: i32,
    pub service_ids: Vec<i32>,
    pub notes: Option<String>,
}

/// Incoming request from the booking flow
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(range(min = 1, message = "customer id is required"))]
    pub customer_id: i32,
    #[validate(range(min = 1, message = "vehicle id is required"))]
    pub vehicle_id: i32,
    #[validate(range(min = 1, message = "center id is required"))]
    pub center_id: i32,
    #[validate(range(min = 1, message = "technician id is required"))]
    pub technician_id: i32,
    pub booking_date: NaiveDate,
    /// First slot of the span; the span length follows from the services
    #[validate(range(min = 1, message = "start slot id is required"))]
    pub start_slot_id: i32,
    #[validate(length(min = 1, message = "at least one service is required"))]
    pub service_ids: Vec<i32>,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
}
