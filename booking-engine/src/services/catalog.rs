//! Configuration store with a process-wide cache
//!
//! One cache shared by the creation and edit flows, so both see the
//! same snapshot within a session. Every configuration write persists
//! first, then invalidates, so the next session observes the new
//! configuration while already-persisted bookings keep their price
//! snapshots.

use crate::db::repository::SettingsRepository;
use parking_lot::RwLock;
use shared::models::{ClothCatalog, GstPolicy, GstPolicyUpdate, ServiceCatalog};
use shared::AppResult;
use std::sync::Arc;

#[derive(Default)]
struct CachedConfig {
    services: Option<ServiceCatalog>,
    cloths: Option<ClothCatalog>,
    gst: Option<GstPolicy>,
}

/// Cached view over the settings repositories
#[derive(Clone)]
pub struct CatalogService {
    repo: SettingsRepository,
    cache: Arc<RwLock<CachedConfig>>,
}

impl CatalogService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self {
            repo,
            cache: Arc::new(RwLock::new(CachedConfig::default())),
        }
    }

    /// Drop every cached snapshot; the next read hits storage
    pub fn invalidate(&self) {
        let mut cache = self.cache.write();
        *cache = CachedConfig::default();
        tracing::debug!("Configuration cache invalidated");
    }

    // ==================== Reads (through the cache) ====================

    /// Service catalog + price matrix
    pub async fn services(&self) -> AppResult<ServiceCatalog> {
        if let Some(catalog) = self.cache.read().services.clone() {
            return Ok(catalog);
        }
        let catalog = self.repo.load_services().await?;
        self.cache.write().services = Some(catalog.clone());
        Ok(catalog)
    }

    /// Cloth catalog
    pub async fn cloth_types(&self) -> AppResult<ClothCatalog> {
        if let Some(catalog) = self.cache.read().cloths.clone() {
            return Ok(catalog);
        }
        let catalog = self.repo.load_cloth_types().await?;
        self.cache.write().cloths = Some(catalog.clone());
        Ok(catalog)
    }

    /// GST policy
    pub async fn gst_policy(&self) -> AppResult<GstPolicy> {
        if let Some(policy) = self.cache.read().gst.clone() {
            return Ok(policy);
        }
        let policy = self.repo.load_gst_policy().await?;
        self.cache.write().gst = Some(policy.clone());
        Ok(policy)
    }

    // ==================== Writes (persist, then invalidate) ====================

    pub async fn save_services(&self, catalog: &ServiceCatalog) -> AppResult<()> {
        self.repo.save_services(catalog).await?;
        self.invalidate();
        Ok(())
    }

    pub async fn save_cloth_types(&self, catalog: &ClothCatalog) -> AppResult<()> {
        self.repo.save_cloth_types(catalog).await?;
        self.invalidate();
        Ok(())
    }

    pub async fn save_gst_policy(&self, policy: &GstPolicy) -> AppResult<()> {
        self.repo.save_gst_policy(policy).await?;
        self.invalidate();
        Ok(())
    }

    pub async fn update_gst_policy(&self, update: GstPolicyUpdate) -> AppResult<GstPolicy> {
        let policy = self.repo.update_gst_policy(update).await?;
        self.invalidate();
        Ok(policy)
    }
}
