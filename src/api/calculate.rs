use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use crate::domain::{Decimal, HsCode};
use crate::engine::{compute_impact, CalculationResult};
use crate::error::AppError;
use crate::orchestration::{CalculateRequest, PassThroughSource};

#[derive(Debug, Default, Deserialize)]
pub struct CalculateQuery {
    /// Round dollars to 2 places and percents to 1 before responding.
    pub rounded: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub result: CalculationResult,
    pub pass_through_rate_percent: Decimal,
    pub pass_through_source: PassThroughSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<HsCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

pub async fn calculate(
    Query(params): Query<CalculateQuery>,
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(request) = payload?;
    let resolved = request.resolve(&*state.catalog)?;
    let result = compute_impact(&resolved.input)?;

    debug!(
        "Calculated impact for {:?} (pass-through {} from {:?})",
        resolved.hs_code, resolved.input.pass_through_rate_percent, resolved.pass_through_source
    );

    let result = if params.rounded.unwrap_or(false) {
        result.rounded_for_display()
    } else {
        result
    };

    Ok(Json(CalculateResponse {
        result,
        pass_through_rate_percent: resolved.input.pass_through_rate_percent,
        pass_through_source: resolved.pass_through_source,
        hs_code: resolved.hs_code,
        product_name: resolved.product.map(|p| p.name),
    }))
}
