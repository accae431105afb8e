//! Error type and result alias

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type crossing the engine boundary, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level reasons, context)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error for a missing required field
    pub fn required_field(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
            .with_detail("reason", "required")
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{r} not found"))
            .with_detail("resource", r)
    }

    /// Create a booking not found error
    pub fn booking_not_found(order_id: impl Into<String>) -> Self {
        let id = order_id.into();
        Self::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found"))
            .with_detail("order_id", id)
    }

    /// Create an edit-not-allowed error for a non-pending booking
    pub fn edit_not_allowed(order_id: impl Into<String>, status: impl Into<String>) -> Self {
        let id = order_id.into();
        let status = status.into();
        Self::with_message(
            ErrorCode::EditNotAllowed,
            format!("Booking {id} is {status}; only pending bookings can be edited"),
        )
        .with_detail("order_id", id)
        .with_detail("status", status)
    }

    /// Create a stale-version conflict error
    pub fn conflict(order_id: impl Into<String>) -> Self {
        let id = order_id.into();
        Self::with_message(
            ErrorCode::Conflict,
            format!("Booking {id} was modified by another writer; reload and retry"),
        )
        .with_detail("order_id", id)
    }

    /// Create a confirmation-required error for destructive operations
    pub fn confirmation_required(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfirmationRequired, msg)
    }

    /// Create an invalid status transition error
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot transition from {from} to {to}"),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{r} already exists"))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::BookingNotFound);
        assert_eq!(err.code, ErrorCode::BookingNotFound);
        assert_eq!(err.message, "Booking not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "phone")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "phone");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_edit_not_allowed() {
        let err = AppError::edit_not_allowed("0042", "completed");
        assert_eq!(err.code, ErrorCode::EditNotAllowed);
        assert!(err.message.contains("0042"));
        assert!(err.message.contains("completed"));
        let details = err.details.unwrap();
        assert_eq!(details.get("order_id").unwrap(), "0042");
    }

    #[test]
    fn test_required_field() {
        let err = AppError::required_field("customer_name");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            "customer_name"
        );
    }

    #[test]
    fn test_display() {
        let err = AppError::conflict("0001");
        assert!(format!("{err}").contains("reload and retry"));
    }
}
