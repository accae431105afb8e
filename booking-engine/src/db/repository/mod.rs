//! Repository Module
//!
//! CRUD operations over the durable collections: `booking`, `customer`,
//! the settings singletons, and the order counter.

pub mod booking;
pub mod counter;
pub mod customer;
pub mod settings;

// Re-exports
pub use booking::BookingRepository;
pub use counter::{CounterRepository, format_order_id, parse_order_id};
pub use customer::CustomerRepository;
pub use settings::SettingsRepository;

use shared::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Stale version: {0}")]
    StaleVersion(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Duplicate(what) => AppError::already_exists(what),
            RepoError::StaleVersion(id) => AppError::conflict(id),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Storage failure surfaced to caller");
                AppError::database(msg)
            }
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::ValidationFailed, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
