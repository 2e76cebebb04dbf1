use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// Lost an optimistic update against a concurrent writer
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid booking status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error(
        "Technician {technician_id} slot {slot_id} on {work_date} is {status}, expected Assigned or Reserved"
    )]
    InvalidSlotState {
        technician_id: i32,
        work_date: NaiveDate,
        slot_id: i32,
        status: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if the caller retries it.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    /// Contract violations that must never be retried blindly.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidTransition { .. } | DomainError::InvalidSlotState { .. }
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(errors.to_string())
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(String),
}

/// Top-level error of the service binary
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}
