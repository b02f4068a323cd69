//! Database queries for catalog lookups.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{AddOn, Package, Studio};

/// Get a studio by id
pub async fn get_studio(pool: &PgPool, studio_id: Uuid) -> Result<Studio> {
    let studio = sqlx::query_as::<_, Studio>(
        r#"
        SELECT id, name, start_time, end_time, deleted_at
        FROM booking_studio
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(studio_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(studio)
}

/// Get a package by id, joined with its category's minimum lead hours
pub async fn get_package(pool: &PgPool, package_id: Uuid) -> Result<Package> {
    let package = sqlx::query_as::<_, Package>(
        r#"
        SELECT
            p.id,
            p.name,
            p.price,
            p.is_fixed,
            p.category_id,
            c.min_hours
        FROM booking_package p
        JOIN booking_category c ON p.category_id = c.id
        WHERE p.id = $1
          AND p.deleted_at IS NULL
        "#,
    )
    .bind(package_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(package)
}

/// Get all studios (for cache warming)
pub async fn list_studios(pool: &PgPool) -> Result<Vec<Studio>> {
    let studios = sqlx::query_as::<_, Studio>(
        r#"
        SELECT id, name, start_time, end_time, deleted_at
        FROM booking_studio
        WHERE deleted_at IS NULL
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(studios)
}

/// Get all packages with category lead hours (for cache warming)
pub async fn list_packages(pool: &PgPool) -> Result<Vec<Package>> {
    let packages = sqlx::query_as::<_, Package>(
        r#"
        SELECT
            p.id,
            p.name,
            p.price,
            p.is_fixed,
            p.category_id,
            c.min_hours
        FROM booking_package p
        JOIN booking_category c ON p.category_id = c.id
        WHERE p.deleted_at IS NULL
        ORDER BY p.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(packages)
}

/// Get an add-on by id
pub async fn get_add_on(pool: &PgPool, add_on_id: Uuid) -> Result<AddOn> {
    let add_on = sqlx::query_as::<_, AddOn>(
        r#"
        SELECT id, name, price, deleted_at
        FROM booking_addon
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(add_on_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(add_on)
}
