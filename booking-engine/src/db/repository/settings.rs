//! Settings Repositories (Singletons)
//!
//! Service catalog, cloth catalog, and GST policy are singleton
//! documents. First access seeds a default set, so a fresh install is
//! usable without any configuration step.

use super::{BaseRepository, RepoError, RepoResult};
use serde::{Deserialize, Serialize};
use shared::models::{
    ClothCatalog, ClothItem, GstPolicy, GstPolicyUpdate, PriceMatrix, ServiceCatalog, ServiceType,
};
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SERVICE_TABLE: &str = "service_config";
const CLOTH_TABLE: &str = "cloth_config";
const GST_TABLE: &str = "gst_config";
const SINGLETON_ID: &str = "main";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceConfigDoc {
    services: Vec<ServiceType>,
    prices: PriceMatrix,
    updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClothConfigDoc {
    cloths: Vec<ClothItem>,
    updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GstConfigDoc {
    enabled: bool,
    sgst_percentage: f64,
    cgst_percentage: f64,
    updated_at: i64,
}

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ==================== Service catalog ====================

    /// Load the service catalog, seeding defaults on first access
    pub async fn load_services(&self) -> RepoResult<ServiceCatalog> {
        let doc: Option<ServiceConfigDoc> =
            self.base.db().select((SERVICE_TABLE, SINGLETON_ID)).await?;
        if let Some(doc) = doc {
            return Ok(ServiceCatalog {
                services: doc.services,
                prices: doc.prices,
            });
        }

        tracing::info!("Service catalog missing, seeding defaults");
        let seeded = default_service_catalog();
        self.save_services(&seeded).await?;
        Ok(seeded)
    }

    /// Persist the service catalog
    pub async fn save_services(&self, catalog: &ServiceCatalog) -> RepoResult<()> {
        let doc = ServiceConfigDoc {
            services: catalog.services.clone(),
            prices: catalog.prices.clone(),
            updated_at: shared::util::now_millis(),
        };
        let _: Option<ServiceConfigDoc> = self
            .base
            .db()
            .upsert((SERVICE_TABLE, SINGLETON_ID))
            .content(doc)
            .await?;
        Ok(())
    }

    // ==================== Cloth catalog ====================

    /// Load the cloth catalog, seeding defaults on first access
    pub async fn load_cloth_types(&self) -> RepoResult<ClothCatalog> {
        let doc: Option<ClothConfigDoc> =
            self.base.db().select((CLOTH_TABLE, SINGLETON_ID)).await?;
        if let Some(doc) = doc {
            return Ok(ClothCatalog { cloths: doc.cloths });
        }

        tracing::info!("Cloth catalog missing, seeding defaults");
        let seeded = default_cloth_catalog();
        self.save_cloth_types(&seeded).await?;
        Ok(seeded)
    }

    /// Persist the cloth catalog
    pub async fn save_cloth_types(&self, catalog: &ClothCatalog) -> RepoResult<()> {
        let doc = ClothConfigDoc {
            cloths: catalog.cloths.clone(),
            updated_at: shared::util::now_millis(),
        };
        let _: Option<ClothConfigDoc> = self
            .base
            .db()
            .upsert((CLOTH_TABLE, SINGLETON_ID))
            .content(doc)
            .await?;
        Ok(())
    }

    // ==================== GST policy ====================

    /// Load the GST policy, seeding the default on first access
    pub async fn load_gst_policy(&self) -> RepoResult<GstPolicy> {
        let doc: Option<GstConfigDoc> = self.base.db().select((GST_TABLE, SINGLETON_ID)).await?;
        if let Some(doc) = doc {
            return Ok(GstPolicy {
                enabled: doc.enabled,
                sgst_percentage: doc.sgst_percentage,
                cgst_percentage: doc.cgst_percentage,
            });
        }

        tracing::info!("GST policy missing, seeding default (9% + 9%, enabled)");
        let seeded = GstPolicy::default();
        self.save_gst_policy(&seeded).await?;
        Ok(seeded)
    }

    /// Persist the GST policy
    pub async fn save_gst_policy(&self, policy: &GstPolicy) -> RepoResult<()> {
        if policy.sgst_percentage < 0.0 || policy.cgst_percentage < 0.0 {
            return Err(RepoError::Validation(
                "GST percentages must be non-negative".to_string(),
            ));
        }
        let doc = GstConfigDoc {
            enabled: policy.enabled,
            sgst_percentage: policy.sgst_percentage,
            cgst_percentage: policy.cgst_percentage,
            updated_at: shared::util::now_millis(),
        };
        let _: Option<GstConfigDoc> = self
            .base
            .db()
            .upsert((GST_TABLE, SINGLETON_ID))
            .content(doc)
            .await?;
        Ok(())
    }

    /// Merge a partial GST update onto the stored policy
    pub async fn update_gst_policy(&self, update: GstPolicyUpdate) -> RepoResult<GstPolicy> {
        let mut policy = self.load_gst_policy().await?;
        if let Some(enabled) = update.enabled {
            policy.enabled = enabled;
        }
        if let Some(sgst) = update.sgst_percentage {
            policy.sgst_percentage = sgst;
        }
        if let Some(cgst) = update.cgst_percentage {
            policy.cgst_percentage = cgst;
        }
        self.save_gst_policy(&policy).await?;
        Ok(policy)
    }
}

// ==================== Default seeds ====================

fn service(id: &str, name: &str) -> ServiceType {
    ServiceType {
        id: id.to_string(),
        name: name.to_string(),
        enabled: true,
    }
}

fn cloth(id: &str, name: &str) -> ClothItem {
    ClothItem {
        id: id.to_string(),
        name: name.to_string(),
        icon_ref: Some(format!("icons/{id}.png")),
        enabled: true,
    }
}

fn price_row(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(id, price)| (id.to_string(), *price))
        .collect()
}

/// Default service catalog for a fresh install
pub fn default_service_catalog() -> ServiceCatalog {
    let mut prices: PriceMatrix = HashMap::new();
    prices.insert(
        "ironing".into(),
        price_row(&[
            ("shirt", 10.0),
            ("tshirt", 10.0),
            ("pant", 12.0),
            ("saree", 30.0),
            ("kurta", 15.0),
            ("bedsheet", 25.0),
        ]),
    );
    prices.insert(
        "wash-fold".into(),
        price_row(&[
            ("shirt", 20.0),
            ("tshirt", 18.0),
            ("pant", 22.0),
            ("saree", 60.0),
            ("kurta", 30.0),
            ("bedsheet", 50.0),
        ]),
    );
    prices.insert(
        "wash-iron".into(),
        price_row(&[
            ("shirt", 28.0),
            ("tshirt", 25.0),
            ("pant", 30.0),
            ("saree", 80.0),
            ("kurta", 40.0),
            ("bedsheet", 65.0),
        ]),
    );
    prices.insert(
        "dry-clean".into(),
        price_row(&[
            ("shirt", 60.0),
            ("tshirt", 55.0),
            ("pant", 70.0),
            ("saree", 150.0),
            ("kurta", 90.0),
            ("bedsheet", 120.0),
        ]),
    );

    ServiceCatalog {
        services: vec![
            service("ironing", "Ironing"),
            service("wash-fold", "Wash & Fold"),
            service("wash-iron", "Wash & Iron"),
            service("dry-clean", "Dry Cleaning"),
        ],
        prices,
    }
}

/// Default cloth catalog for a fresh install
pub fn default_cloth_catalog() -> ClothCatalog {
    ClothCatalog {
        cloths: vec![
            cloth("shirt", "Shirt"),
            cloth("tshirt", "T-Shirt"),
            cloth("pant", "Pant"),
            cloth("saree", "Saree"),
            cloth("kurta", "Kurta"),
            cloth("bedsheet", "Bedsheet"),
        ],
    }
}
