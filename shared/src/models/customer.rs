//! Customer model

use serde::{Deserialize, Serialize};

/// Customer record, keyed by phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub phone: String,
    pub name: String,
    /// Milliseconds since epoch; preserved across upserts
    pub created_at: i64,
}

/// Upsert payload for the creation flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpsert {
    pub phone: String,
    pub name: String,
}
