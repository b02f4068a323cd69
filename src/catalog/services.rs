//! Cache-backed catalog lookups.
//!
//! Availability and pricing reads tolerate short staleness (the commit path
//! recomputes everything server-side before writing), so catalog rows are
//! served through the moka caches with a TTL.

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::Result;

use super::models::{AddOn, Package, Studio};
use super::queries;

/// Get a studio, preferring the cache
pub async fn get_studio(pool: &PgPool, cache: &AppCache, studio_id: Uuid) -> Result<Arc<Studio>> {
    if let Some(cached) = cache.studios.get(&studio_id).await {
        tracing::debug!("Cache HIT for studio: {}", studio_id);
        return Ok(cached);
    }

    let studio = Arc::new(queries::get_studio(pool, studio_id).await?);
    cache.studios.insert(studio_id, studio.clone()).await;
    Ok(studio)
}

/// Get a package (with category lead hours), preferring the cache
pub async fn get_package(pool: &PgPool, cache: &AppCache, package_id: Uuid) -> Result<Arc<Package>> {
    if let Some(cached) = cache.packages.get(&package_id).await {
        tracing::debug!("Cache HIT for package: {}", package_id);
        return Ok(cached);
    }

    let package = Arc::new(queries::get_package(pool, package_id).await?);
    cache.packages.insert(package_id, package.clone()).await;
    Ok(package)
}

/// Get an add-on, preferring the cache
pub async fn get_add_on(pool: &PgPool, cache: &AppCache, add_on_id: Uuid) -> Result<Arc<AddOn>> {
    if let Some(cached) = cache.add_ons.get(&add_on_id).await {
        return Ok(cached);
    }

    let add_on = Arc::new(queries::get_add_on(pool, add_on_id).await?);
    cache.add_ons.insert(add_on_id, add_on.clone()).await;
    Ok(add_on)
}
