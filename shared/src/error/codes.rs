//! Unified error codes for the booking engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Booking errors
//! - 6xxx: Catalog/configuration errors
//! - 8xxx: Customer errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with embedding UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Edit attempted on a non-pending booking
    EditNotAllowed = 4002,
    /// Status transition not permitted
    InvalidStatusTransition = 4003,
    /// Line item already present on the booking
    ItemAlreadyPresent = 4004,
    /// Line item not found on the booking
    ItemNotFound = 4005,
    /// Write lost to a concurrent writer (stale version)
    Conflict = 4006,
    /// Destructive operation attempted without confirmation
    ConfirmationRequired = 4007,

    // ==================== 6xxx: Catalog ====================
    /// Service type not found
    ServiceNotFound = 6001,
    /// Cloth item not found
    ClothNotFound = 6002,
    /// Configuration document missing (auto-seeded, not user-fatal)
    ConfigMissing = 6101,

    // ==================== 8xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 8001,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::EditNotAllowed => "Booking can only be edited while pending",
            ErrorCode::InvalidStatusTransition => "Status transition not permitted",
            ErrorCode::ItemAlreadyPresent => "Item is already on the booking",
            ErrorCode::ItemNotFound => "Item not found on the booking",
            ErrorCode::Conflict => "Booking was modified by another writer",
            ErrorCode::ConfirmationRequired => "Destructive operation requires confirmation",

            // Catalog
            ErrorCode::ServiceNotFound => "Service type not found",
            ErrorCode::ClothNotFound => "Cloth item not found",
            ErrorCode::ConfigMissing => "Configuration missing, defaults seeded",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,
            4001 => ErrorCode::BookingNotFound,
            4002 => ErrorCode::EditNotAllowed,
            4003 => ErrorCode::InvalidStatusTransition,
            4004 => ErrorCode::ItemAlreadyPresent,
            4005 => ErrorCode::ItemNotFound,
            4006 => ErrorCode::Conflict,
            4007 => ErrorCode::ConfirmationRequired,
            6001 => ErrorCode::ServiceNotFound,
            6002 => ErrorCode::ClothNotFound,
            6101 => ErrorCode::ConfigMissing,
            8001 => ErrorCode::CustomerNotFound,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9005 => ErrorCode::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
