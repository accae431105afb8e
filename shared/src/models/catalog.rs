//! Service and cloth catalogs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price matrix: service id -> (cloth id -> non-negative unit price)
///
/// Authoritative price source at the moment of use. Bookings embed price
/// snapshots, so later matrix changes never alter existing bookings.
pub type PriceMatrix = HashMap<String, HashMap<String, f64>>;

/// A named treatment (e.g. ironing, wash-and-fold) with its own price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

/// A billable garment or category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothItem {
    pub id: String,
    pub name: String,
    /// Opaque icon reference (URL or asset path); never interpreted here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_ref: Option<String>,
    pub enabled: bool,
}

/// Service catalog plus its price matrix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<ServiceType>,
    pub prices: PriceMatrix,
}

impl ServiceCatalog {
    /// Look up a unit price; missing entries default to 0
    pub fn price_of(&self, service_id: &str, cloth_id: &str) -> f64 {
        self.prices
            .get(service_id)
            .and_then(|row| row.get(cloth_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether the catalog knows this service id (enabled or not)
    pub fn has_service(&self, service_id: &str) -> bool {
        self.services.iter().any(|s| s.id == service_id)
    }
}

/// Cloth catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClothCatalog {
    pub cloths: Vec<ClothItem>,
}

impl ClothCatalog {
    pub fn get(&self, cloth_id: &str) -> Option<&ClothItem> {
        self.cloths.iter().find(|c| c.id == cloth_id)
    }
}
