pub mod calculate;
pub mod health;
pub mod products;
pub mod scenarios;
pub mod tariffs;

use crate::catalog::ProductCatalog;
use crate::config::{AllowedOrigins, Config};
use crate::orchestration::TariffUpdater;
use crate::tariffs::TariffRateSource;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<ProductCatalog>,
    pub updater: Arc<TariffUpdater>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<ProductCatalog>,
        tariff_source: Arc<dyn TariffRateSource>,
    ) -> Self {
        let updater = Arc::new(TariffUpdater::new(tariff_source, catalog.clone()));
        Self {
            config,
            catalog,
            updater,
        }
    }
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::from(Any),
        AllowedOrigins::List(list) => AllowOrigin::list(list.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:hs_code", get(products::get_product))
        .route(
            "/api/price-history/:hs_code",
            get(products::get_price_history),
        )
        .route("/api/calculate", post(calculate::calculate))
        .route("/api/tariff-scenarios", get(scenarios::get_tariff_scenarios))
        .route("/api/update-tariffs", post(tariffs::update_tariffs))
        .route("/api/tariff-info/:hs_code", get(tariffs::get_tariff_info))
        .layer(cors)
        .with_state(state)
}
