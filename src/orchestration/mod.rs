//! Coordination between the HTTP layer, the catalog, the tariff-rate source
//! and the engine.

pub mod resolve;
pub mod update;

pub use resolve::{
    resolve_pass_through, CalculateRequest, PassThroughSource, ResolveError, ResolvedCalculation,
};
pub use update::{TariffInfo, TariffUpdater, UpdateError, UpdateReport};
