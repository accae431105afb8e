//! Administrative operations
//!
//! The order reset deletes every booking and zeroes the id counter as
//! one transaction. It is destructive and unrecoverable, so it demands
//! a two-step confirmation: an acknowledgement flag plus a typed
//! confirmation phrase.

use crate::db::repository::CounterRepository;
use crate::orders::{BookingChange, BookingFeed};
use shared::{AppError, AppResult};

/// Phrase an operator must type to confirm a full order reset
pub const RESET_PHRASE: &str = "RESET ALL ORDERS";

/// Two-step confirmation for destructive bulk operations
#[derive(Debug, Clone)]
pub struct ResetConfirmation {
    pub acknowledged: bool,
    pub phrase: String,
}

impl ResetConfirmation {
    /// A fully confirmed request
    pub fn confirmed() -> Self {
        Self {
            acknowledged: true,
            phrase: RESET_PHRASE.to_string(),
        }
    }
}

/// Administrative service
#[derive(Clone)]
pub struct AdminService {
    counter: CounterRepository,
    feed: BookingFeed,
}

impl AdminService {
    pub fn new(counter: CounterRepository, feed: BookingFeed) -> Self {
        Self { counter, feed }
    }

    /// Delete all bookings and reset the order counter to zero
    ///
    /// Returns the exact number of bookings removed. Refuses to run
    /// unless the confirmation is acknowledged and carries the exact
    /// phrase [`RESET_PHRASE`].
    pub async fn reset_orders(&self, confirmation: ResetConfirmation) -> AppResult<u64> {
        if !confirmation.acknowledged {
            return Err(AppError::confirmation_required(
                "Order reset must be acknowledged",
            ));
        }
        if confirmation.phrase != RESET_PHRASE {
            return Err(AppError::confirmation_required(format!(
                "Order reset requires the confirmation phrase {RESET_PHRASE:?}"
            ))
            .with_detail("expected_phrase", RESET_PHRASE));
        }

        let removed = self.counter.reset().await?;
        tracing::warn!(removed, "Administrative order reset executed");
        self.feed.publish(BookingChange::reset());
        Ok(removed)
    }
}
