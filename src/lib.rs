pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod tariffs;

pub use catalog::{ProductCatalog, ProductLookup};
pub use config::Config;
pub use domain::{Decimal, ElasticityPair, HsCode, PricePoint, Product, TariffScenarios};
pub use engine::{compute_impact, CalcError, CalculationInput, CalculationResult, InputField};
pub use error::AppError;
pub use tariffs::{MockTariffRateSource, TariffRateSource, TariffSourceError, UsitcHtsSource};
