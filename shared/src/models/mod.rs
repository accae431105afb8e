//! Domain models

pub mod booking;
pub mod catalog;
pub mod customer;
pub mod gst;
pub mod status;

pub use booking::{Booking, BookingDraft, BookingItem, BookingPatch, Totals};
pub use catalog::{ClothCatalog, ClothItem, PriceMatrix, ServiceCatalog, ServiceType};
pub use customer::{Customer, CustomerUpsert};
pub use gst::{GstPolicy, GstPolicyUpdate};
pub use status::{OrderStatus, ParseStatusError};
