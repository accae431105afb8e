//! Customer Repository
//!
//! Customers are keyed by phone number. The creation flow upserts the
//! customer and the booking in one transaction (see
//! `BookingRepository::create_with_customer`).

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Customer, CustomerUpsert};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all customers ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer ORDER BY name")
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Find a customer by phone
    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> = self.base.db().select((TABLE, phone)).await?;
        Ok(customer)
    }

    /// Upsert a customer, preserving `created_at` for existing records
    pub async fn upsert(&self, data: CustomerUpsert) -> RepoResult<Customer> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT type::thing($tb, $phone) \
                 SET phone = $phone, name = $name, created_at = created_at ?? $now \
                 RETURN AFTER",
            )
            .bind(("tb", TABLE))
            .bind(("phone", data.phone))
            .bind(("name", data.name))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let rows: Vec<Customer> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to upsert customer".to_string()))
    }
}
