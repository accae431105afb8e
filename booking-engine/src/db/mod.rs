//! Database Module
//!
//! Owns the embedded SurrealDB handle. All durable state of the engine
//! lives here: bookings, customers, settings singletons, and the order
//! counter.

pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "laundry";
const DATABASE: &str = "bookings";

/// Database service — owns an embedded SurrealDB instance
#[derive(Clone)]
pub struct Database {
    db: Surreal<Db>,
}

impl Database {
    /// Open (or create) the on-disk database at the given path
    pub async fn open(path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path, "Database opened (embedded SurrealDB)");
        Ok(Self { db })
    }

    /// Open an in-memory database (tests and previews)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }

    /// Raw handle for the repository layer
    pub fn handle(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
