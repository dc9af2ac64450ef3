//! Catalog entities: Product, ElasticityPair, PricePoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Decimal, HsCode};

/// Demand and supply elasticities of a traded good.
///
/// Demand is expected negative (e.g. -2.0), supply positive (e.g. 1.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticityPair {
    pub demand: Decimal,
    pub supply: Decimal,
}

impl ElasticityPair {
    pub fn new(demand: Decimal, supply: Decimal) -> Self {
        Self { demand, supply }
    }
}

/// A product record as maintained by the catalog. The engine only reads it.
///
/// Field names are camelCase on the wire; the snake_case spelling used by
/// the catalog data files is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "hs_code")]
    pub hs_code: HsCode,
    pub name: String,
    pub category: String,
    #[serde(alias = "demand_elasticity")]
    pub demand_elasticity: Decimal,
    #[serde(alias = "supply_elasticity")]
    pub supply_elasticity: Decimal,
    #[serde(default)]
    pub unit: String,
    #[serde(alias = "country_of_origin")]
    pub country_of_origin: String,
    /// Percent.
    #[serde(alias = "current_tariff_rate")]
    pub current_tariff_rate: Decimal,
    /// Percent.
    #[serde(alias = "proposed_tariff_rate")]
    pub proposed_tariff_rate: Decimal,
}

impl Product {
    pub fn elasticity(&self) -> ElasticityPair {
        ElasticityPair::new(self.demand_elasticity, self.supply_elasticity)
    }
}

/// One observed retail price for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    #[serde(alias = "hs_code")]
    pub hs_code: HsCode,
    pub date: NaiveDate,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_accepts_snake_case() {
        let json = r#"{
            "hs_code": "854430",
            "name": "Wiring Sets",
            "category": "Electronics",
            "demand_elasticity": -2.2,
            "supply_elasticity": 1.9,
            "unit": "kg",
            "country_of_origin": "China",
            "current_tariff_rate": 2.5,
            "proposed_tariff_rate": 25.0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.hs_code.as_str(), "854430");
        assert_eq!(
            product.elasticity(),
            ElasticityPair::new(
                Decimal::from_str_canonical("-2.2").unwrap(),
                Decimal::from_str_canonical("1.9").unwrap()
            )
        );
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = r#"{
            "hsCode": "8544.30",
            "name": "Wiring Sets",
            "category": "Electronics",
            "demandElasticity": -2.2,
            "supplyElasticity": 1.9,
            "countryOfOrigin": "China",
            "currentTariffRate": 2.5,
            "proposedTariffRate": 25
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.unit, "");

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["hsCode"], "854430");
        assert_eq!(value["countryOfOrigin"], "China");
        assert!(value["currentTariffRate"].is_number());
        assert!(value.get("hs_code").is_none());
    }

    #[test]
    fn test_price_point_parses_iso_date() {
        let point: PricePoint =
            serde_json::from_str(r#"{"hs_code":"854430","date":"2024-03-01","price":19.99}"#)
                .unwrap();
        assert_eq!(point.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(point.price, Decimal::from_str_canonical("19.99").unwrap());
    }
}
