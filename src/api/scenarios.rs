use axum::Json;

use crate::domain::TariffScenarios;

pub async fn get_tariff_scenarios() -> Json<TariffScenarios> {
    Json(TariffScenarios::reference())
}
