//! Booking Repository
//!
//! Bookings are keyed by order id. Updates are compare-and-swap on the
//! `version` field; a stale version surfaces as a conflict so the
//! caller can reload and retry. Storage failures are surfaced verbatim,
//! never retried silently.

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Booking, Customer, CustomerUpsert};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all bookings, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Find a booking by order id
    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<Booking>> {
        let booking: Option<Booking> = self.base.db().select((TABLE, order_id)).await?;
        Ok(booking)
    }

    /// Find a booking by order id, failing if absent
    pub async fn get(&self, order_id: &str) -> RepoResult<Booking> {
        self.find_by_id(order_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {order_id}")))
    }

    /// Find all bookings for a phone number, newest first
    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Vec<Booking>> {
        let phone = phone.to_string();
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE phone = $phone ORDER BY created_at DESC")
            .bind(("phone", phone))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Persist a new booking and upsert its customer in one transaction
    ///
    /// Creation writes both records or neither; a failure cannot leave
    /// an orphaned customer or booking behind.
    pub async fn create_with_customer(
        &self,
        booking: Booking,
        customer: CustomerUpsert,
    ) -> RepoResult<Booking> {
        if self.find_by_id(&booking.order_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Booking {}",
                booking.order_id
            )));
        }

        let order_id = booking.order_id.clone();
        let mut result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                UPSERT type::thing('customer', $phone)
                    SET phone = $phone, name = $name, created_at = created_at ?? $now;
                CREATE type::thing('booking', $order_id) CONTENT $booking;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("phone", customer.phone))
            .bind(("name", customer.name))
            .bind(("now", shared::util::now_millis()))
            .bind(("order_id", order_id.clone()))
            .bind(("booking", booking))
            .await?;
        let _customers: Vec<Customer> = result.take(0)?;
        let created: Vec<Booking> = result.take(1)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database(format!("Failed to create booking {order_id}")))
    }

    /// Compare-and-swap update against the booking's current version
    ///
    /// `booking.version` carries the version the caller loaded; the
    /// stored record is replaced (with version + 1) only if it still
    /// matches. A mismatch yields `StaleVersion`.
    pub async fn update_cas(&self, booking: &Booking) -> RepoResult<Booking> {
        let expected = booking.version;
        let mut next = booking.clone();
        next.version = expected + 1;
        let order_id = next.order_id.clone();

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing($tb, $id) CONTENT $booking \
                 WHERE version = $expected RETURN AFTER",
            )
            .bind(("tb", TABLE))
            .bind(("id", order_id.clone()))
            .bind(("booking", next))
            .bind(("expected", expected))
            .await?;
        let rows: Vec<Booking> = result.take(0)?;
        match rows.into_iter().next() {
            Some(stored) => Ok(stored),
            None => {
                // Distinguish a lost race from a deleted record
                if self.find_by_id(&order_id).await?.is_some() {
                    Err(RepoError::StaleVersion(order_id))
                } else {
                    Err(RepoError::NotFound(format!("Booking {order_id}")))
                }
            }
        }
    }

    /// Hard delete a booking; the order id is never reissued implicitly
    pub async fn delete(&self, order_id: &str) -> RepoResult<bool> {
        let deleted: Option<Booking> = self.base.db().delete((TABLE, order_id)).await?;
        Ok(deleted.is_some())
    }
}
