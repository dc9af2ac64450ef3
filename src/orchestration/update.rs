use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::catalog::{CatalogError, ProductCatalog, RateUpdate};
use crate::domain::{Decimal, HsCode};
use crate::tariffs::{TariffRateSource, TariffSourceError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProduct {
    pub name: String,
    pub hs_code: HsCode,
    pub old_rate: Decimal,
    pub new_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedProduct {
    pub name: String,
    pub hs_code: HsCode,
    pub reason: String,
}

/// Outcome of refreshing every catalog product's current tariff rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub updated_products: Vec<UpdatedProduct>,
    pub failed_products: Vec<FailedProduct>,
    pub total_processed: usize,
    /// Whether the catalog file was rewritten.
    pub saved: bool,
    pub updated_at: DateTime<Utc>,
}

/// Current official rate for one HS code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffInfo {
    pub hs_code: HsCode,
    pub current_tariff_rate: Option<Decimal>,
    pub data_source: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to fetch tariff schedule: {0}")]
    Source(#[from] TariffSourceError),
    #[error("failed to save catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Refreshes catalog tariff rates from a [`TariffRateSource`].
#[derive(Debug)]
pub struct TariffUpdater {
    source: Arc<dyn TariffRateSource>,
    catalog: Arc<ProductCatalog>,
    // Serializes updates so two refreshes never interleave their file writes.
    update_lock: Mutex<()>,
}

impl TariffUpdater {
    pub fn new(source: Arc<dyn TariffRateSource>, catalog: Arc<ProductCatalog>) -> Self {
        Self {
            source,
            catalog,
            update_lock: Mutex::new(()),
        }
    }

    /// Fetch the schedule once and apply every rate found.
    ///
    /// A fetch or save failure leaves the catalog untouched. When the
    /// catalog was loaded from a file, the file is rewritten with the new
    /// rates before they become visible.
    pub async fn update_all(&self) -> Result<UpdateReport, UpdateError> {
        let _guard = self.update_lock.lock().await;

        let schedule = self.source.fetch_schedule().await?;

        let products = self.catalog.list_products();
        let mut updates = Vec::new();
        let mut updated_products = Vec::new();
        let mut failed_products = Vec::new();

        for product in &products {
            match schedule.find_rate(&product.hs_code) {
                Some(new_rate) => {
                    updates.push(RateUpdate {
                        hs_code: product.hs_code.clone(),
                        current_tariff_rate: new_rate,
                    });
                    updated_products.push(UpdatedProduct {
                        name: product.name.clone(),
                        hs_code: product.hs_code.clone(),
                        old_rate: product.current_tariff_rate,
                        new_rate,
                    });
                }
                None => {
                    warn!("No HTS rate found for {} ({})", product.hs_code, product.name);
                    failed_products.push(FailedProduct {
                        name: product.name.clone(),
                        hs_code: product.hs_code.clone(),
                        reason: "Tariff rate not found in HTS data".to_string(),
                    });
                }
            }
        }

        let commit = self.catalog.commit_rate_updates(&updates).await?;

        info!(
            "Tariff update: {} updated, {} failed, {} processed",
            updated_products.len(),
            failed_products.len(),
            products.len()
        );

        Ok(UpdateReport {
            updated_products,
            failed_products,
            total_processed: products.len(),
            saved: commit.saved,
            updated_at: Utc::now(),
        })
    }

    /// Look up the live official rate for one code without touching the
    /// catalog. `current_tariff_rate` is `None` when the schedule has no
    /// usable rate for it.
    pub async fn tariff_info(&self, hs_code: &HsCode) -> Result<TariffInfo, TariffSourceError> {
        let schedule = self.source.fetch_schedule().await?;

        Ok(TariffInfo {
            hs_code: hs_code.clone(),
            current_tariff_rate: schedule.find_rate(hs_code),
            data_source: self.source.data_source().to_string(),
            last_updated: Utc::now(),
        })
    }
}
