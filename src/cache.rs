//! In-memory caching using moka
//!
//! Application-level caching for catalog rows the availability and pricing
//! reads hit on every request. The catalog changes rarely and the commit
//! path recomputes prices anyway, so short TTLs are a safe trade.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::models::{AddOn, Package, Studio};
use crate::catalog::queries;

/// Application cache holding catalog rows by id
#[derive(Clone)]
pub struct AppCache {
    /// Studios (id -> Studio)
    pub studios: Cache<Uuid, Arc<Studio>>,
    /// Packages with category lead hours (id -> Package)
    pub packages: Cache<Uuid, Arc<Package>>,
    /// Add-ons (id -> AddOn)
    pub add_ons: Cache<Uuid, Arc<AddOn>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Studios: a handful of rooms, 10 min TTL
            studios: Cache::builder()
                .max_capacity(50)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),

            // Packages: price edits should show up within minutes
            packages: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Add-ons: same churn profile as packages
            add_ons: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            studios_size: self.studios.entry_count(),
            packages_size: self.packages.entry_count(),
            add_ons_size: self.add_ons.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.studios.invalidate_all();
        self.packages.invalidate_all();
        self.add_ons.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub studios_size: u64,
    pub packages_size: u64,
    pub add_ons_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 5 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    // Initial warm-up
    warm_cache(&cache, &db).await;

    // Periodic refresh
    let mut interval = interval(Duration::from_secs(5 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with the full studio and package catalogs
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::list_studios(db).await {
        Ok(studios) => {
            for studio in studios {
                cache.studios.insert(studio.id, Arc::new(studio)).await;
            }
        }
        Err(e) => warn!("Failed to warm studio cache: {}", e),
    }

    match queries::list_packages(db).await {
        Ok(packages) => {
            for package in packages {
                cache.packages.insert(package.id, Arc::new(package)).await;
            }
        }
        Err(e) => warn!("Failed to warm package cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
