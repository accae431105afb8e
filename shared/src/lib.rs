//! Shared domain types for the laundry booking engine
//!
//! This crate holds everything the engine and its embedders exchange:
//!
//! - **Models** (`models`): bookings, customers, service/cloth catalogs,
//!   GST policy, and the order status state machine
//! - **Errors** (`error`): unified [`AppError`] with numeric [`ErrorCode`]
//!   and [`ErrorCategory`] classification
//! - **Utilities** (`util`): timestamp helpers
//!
//! No I/O happens here; the storage layer lives in `booking-engine`.

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    Booking, BookingDraft, BookingItem, BookingPatch, ClothCatalog, ClothItem, Customer,
    GstPolicy, OrderStatus, PriceMatrix, ServiceCatalog, ServiceType, Totals,
};
