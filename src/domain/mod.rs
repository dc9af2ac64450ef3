//! Domain types for the tariff tracker.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - HsCode, the canonical harmonized-system identifier
//! - Catalog entities: Product, ElasticityPair, PricePoint
//! - The reference tariff scenario table

pub mod decimal;
pub mod primitives;
pub mod product;
pub mod scenarios;

pub use decimal::Decimal;
pub use primitives::{HsCode, HsCodeError};
pub use product::{ElasticityPair, PricePoint, Product};
pub use scenarios::TariffScenarios;
