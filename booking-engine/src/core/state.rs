//! Engine wiring
//!
//! [`Engine`] owns one instance of every service and repository, all
//! sharing the same embedded database handle and change feed. Cloning
//! an `Engine` is cheap; every component is a thin handle.

use crate::core::Config;
use crate::db::Database;
use crate::db::repository::{
    BookingRepository, CounterRepository, CustomerRepository, SettingsRepository,
};
use crate::orders::{BookingFeed, OrderEditor};
use crate::services::{AdminService, CatalogService};
use shared::AppResult;

/// Booking engine — the single entry point for embedders
///
/// | Field     | Purpose                                  |
/// |-----------|------------------------------------------|
/// | bookings  | Booking persistence with CAS versioning  |
/// | customers | Customer directory keyed by phone        |
/// | catalog   | Cached service/cloth/GST configuration   |
/// | editor    | Create and edit-session workflow         |
/// | admin     | Confirmed destructive operations         |
/// | feed      | Broadcast of booking change snapshots    |
#[derive(Clone)]
pub struct Engine {
    db: Database,
    pub bookings: BookingRepository,
    pub customers: CustomerRepository,
    pub counter: CounterRepository,
    pub catalog: CatalogService,
    pub editor: OrderEditor,
    pub admin: AdminService,
    pub feed: BookingFeed,
}

impl Engine {
    /// Open the engine against the on-disk database from `config`
    pub async fn open(config: &Config) -> AppResult<Self> {
        let db = Database::open(&config.db_path().to_string_lossy()).await?;
        Ok(Self::wire(db))
    }

    /// Open the engine against a fresh in-memory database
    pub async fn open_in_memory() -> AppResult<Self> {
        let db = Database::memory().await?;
        Ok(Self::wire(db))
    }

    fn wire(db: Database) -> Self {
        let bookings = BookingRepository::new(db.handle());
        let customers = CustomerRepository::new(db.handle());
        let counter = CounterRepository::new(db.handle());
        let settings = SettingsRepository::new(db.handle());
        let catalog = CatalogService::new(settings);
        let feed = BookingFeed::new();
        let editor = OrderEditor::new(
            bookings.clone(),
            counter.clone(),
            catalog.clone(),
            feed.clone(),
        );
        let admin = AdminService::new(counter.clone(), feed.clone());

        Self {
            db,
            bookings,
            customers,
            counter,
            catalog,
            editor,
            admin,
            feed,
        }
    }

    /// The underlying database service
    pub fn database(&self) -> &Database {
        &self.db
    }
}
