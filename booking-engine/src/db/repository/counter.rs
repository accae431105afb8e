//! Order Counter Repository (Singleton)
//!
//! Allocates sequential order identifiers from a dedicated counter
//! record via a single-statement atomic increment. The next id is never
//! derived from a collection scan; scans of historical ids are for
//! display and sorting only.
//!
//! The embedded store runs every statement as an optimistic
//! transaction, so concurrent writes to the counter can lose the commit
//! race. Those conflicts are retried here and never reach the caller.

use super::{BaseRepository, RepoError, RepoResult};
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order_counter";
const SINGLETON_ID: &str = "main";

/// Retry budget for optimistic-commit conflicts on the counter record
const MAX_COMMIT_RETRIES: usize = 32;

/// Counter record: current integer value of the allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CounterDoc {
    value: i64,
    #[serde(default)]
    updated_at: i64,
}

/// Row shape of the reset transaction's count statement
#[derive(Debug, Deserialize)]
struct RemovedRow {
    removed: u64,
}

/// Format a counter value as an order id: zero-padded to at least
/// 4 digits, growing naturally past 9999
pub fn format_order_id(value: i64) -> String {
    format!("{value:04}")
}

/// Parse an order id back to its numeric value, tolerating legacy
/// prefixed forms (e.g. `ORD-47`) found in historical data
///
/// Allocation never consumes this; it exists for embedders sorting or
/// migrating records that predate the canonical zero-padded form.
pub fn parse_order_id(id: &str) -> Option<i64> {
    let digits = id.trim().trim_start_matches(|c: char| !c.is_ascii_digit());
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Whether an error message is an optimistic-commit conflict worth
/// retrying
fn is_commit_conflict(msg: &str) -> bool {
    msg.contains("read or write conflict") || msg.contains("transaction can be retried")
}

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
}

impl CounterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Ensure the singleton counter record exists (seeded at 0)
    ///
    /// UPSERT so that racing callers on a fresh store converge on one
    /// record instead of colliding on CREATE. Once the record exists
    /// this is a plain read.
    async fn ensure_exists(&self) -> RepoResult<()> {
        let existing: Option<CounterDoc> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        if existing.is_some() {
            return Ok(());
        }

        let mut attempt = 0;
        loop {
            let outcome = async {
                let _ = self
                    .base
                    .db()
                    .query(
                        "UPSERT type::thing($tb, $id) \
                         SET value = value ?? 0, updated_at = updated_at ?? $now",
                    )
                    .bind(("tb", TABLE))
                    .bind(("id", SINGLETON_ID))
                    .bind(("now", shared::util::now_millis()))
                    .await?
                    .check()?;
                Ok::<_, surrealdb::Error>(())
            }
            .await;

            match outcome {
                Ok(()) => return Ok(()),
                Err(err) if attempt < MAX_COMMIT_RETRIES && is_commit_conflict(&err.to_string()) => {
                    attempt += 1;
                    tracing::debug!(attempt, "Retrying counter seed after commit conflict");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Current counter value without allocating
    pub async fn current(&self) -> RepoResult<i64> {
        self.ensure_exists().await?;
        let doc: Option<CounterDoc> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(doc.map(|d| d.value).unwrap_or(0))
    }

    /// Allocate the next order id
    ///
    /// The increment is one UPDATE statement, so concurrent allocations
    /// can never observe the same value; a lost commit race is retried
    /// here until it lands. First allocation on a fresh counter yields
    /// `"0001"`.
    pub async fn allocate(&self) -> RepoResult<String> {
        self.ensure_exists().await?;

        let mut attempt = 0;
        loop {
            let outcome = async {
                let mut result = self
                    .base
                    .db()
                    .query(
                        "UPDATE type::thing($tb, $id) \
                         SET value += 1, updated_at = $now RETURN AFTER",
                    )
                    .bind(("tb", TABLE))
                    .bind(("id", SINGLETON_ID))
                    .bind(("now", shared::util::now_millis()))
                    .await?;
                let rows: Vec<CounterDoc> = result.take(0)?;
                Ok::<_, surrealdb::Error>(rows)
            }
            .await;

            match outcome {
                Ok(rows) => {
                    let value = rows.into_iter().next().map(|d| d.value).ok_or_else(|| {
                        RepoError::Database("Counter increment returned no row".into())
                    })?;
                    return Ok(format_order_id(value));
                }
                Err(err) if attempt < MAX_COMMIT_RETRIES && is_commit_conflict(&err.to_string()) => {
                    attempt += 1;
                    tracing::debug!(attempt, "Retrying counter increment after commit conflict");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Administrative reset: delete every booking and zero the counter
    /// as one transaction, returning the exact number of bookings
    /// removed
    pub async fn reset(&self) -> RepoResult<u64> {
        self.ensure_exists().await?;

        let mut attempt = 0;
        loop {
            let outcome = async {
                let mut result = self
                    .base
                    .db()
                    .query(
                        r#"
                        BEGIN TRANSACTION;
                        SELECT count() AS removed FROM booking GROUP ALL;
                        DELETE booking;
                        UPDATE type::thing($tb, $id) SET value = 0, updated_at = $now;
                        COMMIT TRANSACTION;
                        "#,
                    )
                    .bind(("tb", TABLE))
                    .bind(("id", SINGLETON_ID))
                    .bind(("now", shared::util::now_millis()))
                    .await?;
                let counted: Vec<RemovedRow> = result.take(0)?;
                Ok::<_, surrealdb::Error>(counted)
            }
            .await;

            match outcome {
                Ok(counted) => {
                    let removed = counted.into_iter().next().map(|r| r.removed).unwrap_or(0);
                    tracing::warn!(removed, "Order counter reset; all bookings deleted");
                    return Ok(removed);
                }
                Err(err) if attempt < MAX_COMMIT_RETRIES && is_commit_conflict(&err.to_string()) => {
                    attempt += 1;
                    tracing::debug!(attempt, "Retrying counter reset after commit conflict");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero_pads_to_four() {
        assert_eq!(format_order_id(1), "0001");
        assert_eq!(format_order_id(48), "0048");
        assert_eq!(format_order_id(9999), "9999");
    }

    #[test]
    fn test_format_grows_past_9999() {
        assert_eq!(format_order_id(10000), "10000");
        assert_eq!(format_order_id(123456), "123456");
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_order_id("0001"), Some(1));
        assert_eq!(parse_order_id("0048"), Some(48));
        assert_eq!(parse_order_id("10000"), Some(10000));
    }

    #[test]
    fn test_parse_legacy_prefixed() {
        assert_eq!(parse_order_id("ORD-47"), Some(47));
        assert_eq!(parse_order_id("LB12"), Some(12));
        assert_eq!(parse_order_id(" ORD-0103 "), Some(103));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_order_id(""), None);
        assert_eq!(parse_order_id("ORD-"), None);
        assert_eq!(parse_order_id("abc"), None);
    }

    #[test]
    fn test_commit_conflict_detection_is_message_based() {
        assert!(is_commit_conflict(
            "Failed to commit transaction due to a read or write conflict. \
             This transaction can be retried"
        ));
        assert!(!is_commit_conflict("There was a problem with the database"));
        assert!(!is_commit_conflict(
            "Database record `order_counter:main` already exists"
        ));
    }
}
