//! Product catalog: the read-only product lookup the calculator boundary
//! consumes, and the file-backed in-memory catalog serving the API.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{Decimal, HsCode, Product};

pub mod store;

pub use store::{CatalogData, ProductCatalog, RateCommit, PRICE_HISTORY_WINDOW};

/// Lookup of a product by HS code. `None` means "not found", which callers
/// must treat as a normal outcome.
pub trait ProductLookup {
    fn find_product(&self, hs_code: &HsCode) -> Option<Product>;
}

impl ProductLookup for [Product] {
    fn find_product(&self, hs_code: &HsCode) -> Option<Product> {
        self.iter().find(|p| &p.hs_code == hs_code).cloned()
    }
}

impl ProductLookup for Vec<Product> {
    fn find_product(&self, hs_code: &HsCode) -> Option<Product> {
        self.as_slice().find_product(hs_code)
    }
}

/// A new current tariff rate for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateUpdate {
    pub hs_code: HsCode,
    pub current_tariff_rate: Decimal,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write catalog {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate HS code in catalog: {0}")]
    DuplicateHsCode(HsCode),
    #[error("Price history not available")]
    HistoryUnavailable,
    #[error("Price history not found for {0}")]
    HistoryNotFound(HsCode),
}
