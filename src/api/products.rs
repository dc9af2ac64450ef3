use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::catalog::ProductLookup;
use crate::domain::{HsCode, PricePoint, Product};
use crate::error::AppError;

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.list_products())
}

pub async fn get_product(
    Path(hs_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Product>, AppError> {
    let hs_code = HsCode::parse(&hs_code)?;
    state
        .catalog
        .find_product(&hs_code)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Last year of weekly price observations for a product, oldest first.
pub async fn get_price_history(
    Path(hs_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<PricePoint>>, AppError> {
    let hs_code = HsCode::parse(&hs_code)?;
    Ok(Json(state.catalog.price_history(&hs_code)?))
}
