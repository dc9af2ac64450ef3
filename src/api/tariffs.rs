use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::domain::HsCode;
use crate::error::AppError;
use crate::orchestration::{TariffInfo, UpdateReport};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTariffsResponse {
    pub message: String,
    pub updated_count: usize,
    pub failed_count: usize,
    #[serde(flatten)]
    pub report: UpdateReport,
}

/// Refresh every catalog product's current rate from the HTS dataset.
pub async fn update_tariffs(
    State(state): State<AppState>,
) -> Result<Json<UpdateTariffsResponse>, AppError> {
    let report = state.updater.update_all().await?;

    Ok(Json(UpdateTariffsResponse {
        message: "Tariff rates updated successfully".to_string(),
        updated_count: report.updated_products.len(),
        failed_count: report.failed_products.len(),
        report,
    }))
}

pub async fn get_tariff_info(
    Path(hs_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TariffInfo>, AppError> {
    let hs_code = HsCode::parse(&hs_code)?;
    Ok(Json(state.updater.tariff_info(&hs_code).await?))
}
