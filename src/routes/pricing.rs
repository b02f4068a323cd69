//! Pricing route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::booking::requests::SlotPricesQuery;
use crate::error::Result;
use crate::pricing::models::PriceException;
use crate::pricing::{queries, services, SlotPrice};
use crate::AppState;

/// Cumulative end-time prices for a chosen start slot
pub async fn slot_prices(
    State(state): State<AppState>,
    Query(query): Query<SlotPricesQuery>,
) -> Result<Json<Vec<SlotPrice>>> {
    let prices = services::quote_slot_prices(
        &state.db,
        &state.cache,
        query.studio_id,
        query.package_id,
        query.date,
        &query.start,
    )
    .await?;

    Ok(Json(prices))
}

/// Request to create a date-specific pricing override
#[derive(Debug, Deserialize)]
pub struct CreatePriceExceptionRequest {
    pub package_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub is_fixed: bool,
}

/// Create a price exception; a duplicate for the same package+date is rejected
pub async fn create_exception(
    State(state): State<AppState>,
    Json(req): Json<CreatePriceExceptionRequest>,
) -> Result<(StatusCode, Json<PriceException>)> {
    let exception = PriceException {
        id: Uuid::new_v4(),
        package_id: req.package_id,
        date: req.date,
        price: req.price,
        is_fixed: req.is_fixed,
    };

    let inserted = queries::insert_price_exception(&state.db, &exception).await?;
    Ok((StatusCode::CREATED, Json(inserted)))
}
