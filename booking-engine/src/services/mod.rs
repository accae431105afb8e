//! Services Module
//!
//! Process-wide services above the repository layer: the cached
//! configuration store and the administrative reset.

mod admin;
mod catalog;

pub use admin::{AdminService, RESET_PHRASE, ResetConfirmation};
pub use catalog::CatalogService;
