//! Laundry booking engine
//!
//! Core order engine for a laundry operation: per-service per-item
//! pricing, tax computation, sequential order identifiers, and a status
//! lifecycle restricting who may edit what.
//!
//! # Module structure
//!
//! ```text
//! booking-engine/src/
//! ├── core/          # Runtime config, engine wiring
//! ├── db/            # Embedded SurrealDB + repositories
//! ├── pricing/       # Totals calculator (the one authoritative path)
//! ├── orders/        # Edit sessions, change feed, summary text
//! ├── services/      # Cached configuration store, admin reset
//! └── utils/         # Logging setup
//! ```
//!
//! The engine is invoked in-process; it defines no wire protocol. UI
//! rendering, authentication, printing, and asset storage are external
//! collaborators.

pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export public surface
pub use crate::core::{Config, Engine};
pub use db::repository::{RepoError, RepoResult};
pub use orders::{BookingChange, BookingFeed, ChangeKind, EditSession, OrderEditor};
pub use pricing::compute_totals;
pub use services::{AdminService, CatalogService, ResetConfirmation, RESET_PHRASE};
pub use utils::logger::{init_logger, init_logger_with_file};

// Re-export shared domain types the embedder always needs
pub use shared::{AppError, AppResult, Booking, BookingDraft, BookingPatch, OrderStatus};
