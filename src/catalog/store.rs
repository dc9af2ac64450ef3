//! In-memory product catalog backed by a JSON or CSV file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{info, warn};

use super::{CatalogError, ProductLookup, RateUpdate};
use crate::domain::{HsCode, PricePoint, Product};

/// Number of most recent price points served per product (one year of
/// weekly observations).
pub const PRICE_HISTORY_WINDOW: usize = 52;

const SEED_CATALOG: &str = r#"{
  "products": [
    {
      "hs_code": "854430",
      "name": "Wiring Sets",
      "category": "Electronics",
      "demand_elasticity": -2.2,
      "supply_elasticity": 1.9,
      "unit": "kg",
      "country_of_origin": "China",
      "current_tariff_rate": 2.5,
      "proposed_tariff_rate": 25.0
    }
  ]
}"#;

/// Serialized catalog file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    pub products: Vec<Product>,
    #[serde(
        default,
        alias = "price_history",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_history: Option<Vec<PricePoint>>,
}

impl CatalogData {
    /// Returns how many products changed.
    fn apply_rate_updates(&mut self, updates: &[RateUpdate]) -> usize {
        let mut applied = 0;
        for update in updates {
            if let Some(product) = self
                .products
                .iter_mut()
                .find(|p| p.hs_code == update.hs_code)
            {
                product.current_tariff_rate = update.current_tariff_rate;
                applied += 1;
            }
        }
        applied
    }
}

/// Outcome of [`ProductCatalog::commit_rate_updates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCommit {
    pub applied: usize,
    /// Whether the catalog file was rewritten.
    pub saved: bool,
}

#[derive(Debug)]
pub struct ProductCatalog {
    data: RwLock<CatalogData>,
    path: Option<PathBuf>,
}

impl ProductCatalog {
    /// Build a catalog from in-memory data.
    ///
    /// # Errors
    /// `DuplicateHsCode` if two products share a code.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &data.products {
            if !seen.insert(&product.hs_code) {
                return Err(CatalogError::DuplicateHsCode(product.hs_code.clone()));
            }
        }

        Ok(Self {
            data: RwLock::new(data),
            path: None,
        })
    }

    /// The single-product catalog used when no catalog file exists.
    pub fn seed() -> Result<Self, CatalogError> {
        Self::from_json_str(SEED_CATALOG)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// Parse products from CSV with a header row. CSV catalogs carry no
    /// price history.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for record in reader.deserialize::<Product>() {
            products.push(record?);
        }

        Self::new(CatalogData {
            products,
            price_history: None,
        })
    }

    /// Load a catalog file, choosing the format by extension (`.csv` or JSON).
    ///
    /// A missing file falls back to the seed catalog; the path is still
    /// remembered so a later save creates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        let catalog = match std::fs::read(path) {
            Ok(bytes) if is_csv(path) => Self::from_csv_reader(bytes.as_slice())?,
            Ok(bytes) => Self::new(serde_json::from_slice(&bytes)?)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Catalog {} not found, using seed catalog", path.display());
                Self::seed()?
            }
            Err(source) => {
                return Err(CatalogError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        info!(
            "Loaded {} products from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog.with_path(path.to_path_buf()))
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All products in file order.
    pub fn list_products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// The most recent [`PRICE_HISTORY_WINDOW`] points for a product, oldest
    /// first.
    ///
    /// # Errors
    /// `HistoryUnavailable` when the catalog has no price history at all,
    /// `HistoryNotFound` when none of it belongs to `hs_code`.
    pub fn price_history(&self, hs_code: &HsCode) -> Result<Vec<PricePoint>, CatalogError> {
        let data = self.read();
        let history = data
            .price_history
            .as_ref()
            .ok_or(CatalogError::HistoryUnavailable)?;

        let mut points: Vec<PricePoint> = history
            .iter()
            .filter(|p| &p.hs_code == hs_code)
            .cloned()
            .collect();
        if points.is_empty() {
            return Err(CatalogError::HistoryNotFound(hs_code.clone()));
        }

        points.sort_by_key(|p| p.date);
        let skip = points.len().saturating_sub(PRICE_HISTORY_WINDOW);
        Ok(points.split_off(skip))
    }

    /// Replace current tariff rates and persist them when file-backed.
    ///
    /// The new data is written to disk before it is swapped in, so a failed
    /// write leaves both the file and the in-memory catalog unchanged.
    /// Concurrent commits must be serialized by the caller.
    pub async fn commit_rate_updates(
        &self,
        updates: &[RateUpdate],
    ) -> Result<RateCommit, CatalogError> {
        let mut next = self.read().clone();
        let applied = next.apply_rate_updates(updates);

        let saved = match &self.path {
            Some(path) => {
                write_catalog(path, &next).await?;
                true
            }
            None => false,
        };

        *self.data.write().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(RateCommit { applied, saved })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductLookup for ProductCatalog {
    fn find_product(&self, hs_code: &HsCode) -> Option<Product> {
        self.read().products.find_product(hs_code)
    }
}

async fn write_catalog(path: &Path, data: &CatalogData) -> Result<(), CatalogError> {
    let bytes = serde_json::to_vec_pretty(data)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Decimal;
    use tempfile::TempDir;

    fn code(s: &str) -> HsCode {
        HsCode::parse(s).unwrap()
    }

    const TWO_PRODUCTS: &str = r#"{
      "products": [
        {"hs_code": "854430", "name": "Wiring Sets", "category": "Electronics",
         "demand_elasticity": -2.2, "supply_elasticity": 1.9, "unit": "kg",
         "country_of_origin": "China", "current_tariff_rate": 2.5, "proposed_tariff_rate": 25.0},
        {"hs_code": "870323", "name": "Passenger Cars", "category": "Machinery",
         "demand_elasticity": -1.2, "supply_elasticity": 0.8, "unit": "unit",
         "country_of_origin": "Germany", "current_tariff_rate": 2.5, "proposed_tariff_rate": 10.0}
      ]
    }"#;

    #[test]
    fn test_seed_catalog() {
        let catalog = ProductCatalog::seed().unwrap();
        assert_eq!(catalog.len(), 1);
        let product = catalog.find_product(&code("854430")).unwrap();
        assert_eq!(product.name, "Wiring Sets");
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let json = TWO_PRODUCTS.replace("870323", "8544.30");
        let err = ProductCatalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateHsCode(c) if c.as_str() == "854430"));
    }

    #[test]
    fn test_list_keeps_file_order() {
        let catalog = ProductCatalog::from_json_str(TWO_PRODUCTS).unwrap();
        let names: Vec<String> = catalog.list_products().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Wiring Sets", "Passenger Cars"]);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let catalog = ProductCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.path(), Some(path.as_path()));
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ProductCatalog::load(&path),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_load_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.CSV");
        std::fs::write(
            &path,
            "hs_code,name,category,demand_elasticity,supply_elasticity,unit,country_of_origin,current_tariff_rate,proposed_tariff_rate\n\
             8517.12,Smartphones,Electronics,-1.5,1.2,unit,China,0,25\n",
        )
        .unwrap();

        let catalog = ProductCatalog::load(&path).unwrap();
        let product = catalog.find_product(&code("851712")).unwrap();
        assert_eq!(product.name, "Smartphones");
        assert_eq!(product.proposed_tariff_rate, Decimal::from_i64(25));
        assert!(matches!(
            catalog.price_history(&code("851712")),
            Err(CatalogError::HistoryUnavailable)
        ));
    }

    #[test]
    fn test_price_history_window_and_order() {
        let mut history = Vec::new();
        for week in (0..60).rev() {
            let date = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
                + chrono::Duration::weeks(week);
            history.push(serde_json::json!({
                "hs_code": "854430", "date": date.to_string(), "price": 10 + week
            }));
        }
        history.push(serde_json::json!({"hs_code": "870323", "date": "2024-01-01", "price": 30000}));

        let mut value: serde_json::Value = serde_json::from_str(TWO_PRODUCTS).unwrap();
        value["price_history"] = serde_json::Value::Array(history);
        let catalog = ProductCatalog::from_json_str(&value.to_string()).unwrap();

        let points = catalog.price_history(&code("854430")).unwrap();
        assert_eq!(points.len(), PRICE_HISTORY_WINDOW);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(points.last().unwrap().price, Decimal::from_i64(69));

        assert_eq!(catalog.price_history(&code("870323")).unwrap().len(), 1);
        assert!(matches!(
            catalog.price_history(&code("999999")),
            Err(CatalogError::HistoryNotFound(_))
        ));
    }

    fn rate(code_str: &str, value: i64) -> RateUpdate {
        RateUpdate {
            hs_code: code(code_str),
            current_tariff_rate: Decimal::from_i64(value),
        }
    }

    #[tokio::test]
    async fn test_commit_rate_updates_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, TWO_PRODUCTS).unwrap();
        let catalog = ProductCatalog::load(&path).unwrap();

        let commit = catalog
            .commit_rate_updates(&[rate("854430", 7), rate("111111", 9)])
            .await
            .unwrap();
        assert_eq!(commit, RateCommit { applied: 1, saved: true });

        let reloaded = ProductCatalog::load(&path).unwrap();
        let product = reloaded.find_product(&code("854430")).unwrap();
        assert_eq!(product.current_tariff_rate, Decimal::from_i64(7));
        assert_eq!(reloaded.len(), 2);
    }

    #[tokio::test]
    async fn test_commit_without_path_stays_in_memory() {
        let catalog = ProductCatalog::from_json_str(TWO_PRODUCTS).unwrap();
        let commit = catalog
            .commit_rate_updates(&[rate("870323", 4)])
            .await
            .unwrap();
        assert_eq!(commit, RateCommit { applied: 1, saved: false });
        assert_eq!(
            catalog.find_product(&code("870323")).unwrap().current_tariff_rate,
            Decimal::from_i64(4)
        );
    }

    #[tokio::test]
    async fn test_failed_write_leaves_catalog_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("catalog.json");
        let catalog = ProductCatalog::from_json_str(TWO_PRODUCTS)
            .unwrap()
            .with_path(path.clone());
        let before = catalog.list_products();

        let err = catalog
            .commit_rate_updates(&[rate("854430", 7)])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Write { .. }));
        assert_eq!(catalog.list_products(), before);
        assert!(!path.exists());
    }
}
