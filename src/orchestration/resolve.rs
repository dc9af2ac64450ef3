//! Normalization of calculation requests into the canonical engine input.
//!
//! This is the one place where the pass-through precedence lives:
//! explicit override > derived from the product's elasticity > default 75.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::ProductLookup;
use crate::domain::{Decimal, HsCode, HsCodeError, Product};
use crate::engine::{
    clamp_pass_through, default_pass_through, derive_pass_through, CalcError, CalculationInput,
};

/// Which rule produced the pass-through rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassThroughSource {
    Explicit,
    Elasticity,
    Default,
}

/// Calculation request as received from callers.
///
/// camelCase is canonical; the snake_case names and the short field names
/// of older clients (`retail_markup`, `tariff_rate`, ...) are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(alias = "retail_price")]
    pub retail_price: Decimal,
    #[serde(alias = "retailMarkup", alias = "retail_markup", alias = "retail_markup_percent")]
    pub retail_markup_percent: Decimal,
    /// Falls back to the product's proposed rate when omitted.
    #[serde(
        default,
        alias = "tariffRate",
        alias = "tariff_rate",
        alias = "tariff_rate_percent"
    )]
    pub tariff_rate_percent: Option<Decimal>,
    #[serde(
        default,
        alias = "passThroughRate",
        alias = "pass_through_rate",
        alias = "pass_through_rate_percent"
    )]
    pub pass_through_rate_percent: Option<Decimal>,
    #[serde(
        default,
        alias = "inventoryBuffer",
        alias = "inventory_buffer",
        alias = "inventory_buffer_months"
    )]
    pub inventory_buffer_months: Option<Decimal>,
    #[serde(default, alias = "hs_code")]
    pub hs_code: Option<String>,
}

/// A request resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCalculation {
    pub input: CalculationInput,
    pub pass_through_source: PassThroughSource,
    pub hs_code: Option<HsCode>,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid hsCode: {0}")]
    InvalidHsCode(#[from] HsCodeError),
    #[error("tariffRatePercent is required unless hsCode names a known product")]
    MissingTariffRate,
    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Apply the pass-through precedence rule.
///
/// An explicit rate is clamped and always wins, even when it diverges from
/// the elasticity-derived value.
pub fn resolve_pass_through(
    explicit: Option<Decimal>,
    product: Option<&Product>,
) -> Result<(Decimal, PassThroughSource), CalcError> {
    if let Some(rate) = explicit {
        return Ok((clamp_pass_through(rate), PassThroughSource::Explicit));
    }
    match product {
        Some(p) => {
            let derived = derive_pass_through(Some(&p.elasticity()))?;
            Ok((derived, PassThroughSource::Elasticity))
        }
        None => Ok((default_pass_through(), PassThroughSource::Default)),
    }
}

impl CalculateRequest {
    /// Map the request onto a canonical [`CalculationInput`].
    ///
    /// An unknown product is not an error; the default pass-through is used.
    pub fn resolve<L: ProductLookup + ?Sized>(
        self,
        lookup: &L,
    ) -> Result<ResolvedCalculation, ResolveError> {
        let hs_code = self
            .hs_code
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(HsCode::parse)
            .transpose()?;

        let product = hs_code.as_ref().and_then(|code| {
            let found = lookup.find_product(code);
            if found.is_none() {
                debug!("Product {} not found, using default pass-through", code);
            }
            found
        });

        let tariff_rate_percent = self
            .tariff_rate_percent
            .or_else(|| product.as_ref().map(|p| p.proposed_tariff_rate))
            .ok_or(ResolveError::MissingTariffRate)?;

        let mut input = CalculationInput {
            retail_price: self.retail_price,
            retail_markup_percent: self.retail_markup_percent,
            tariff_rate_percent,
            pass_through_rate_percent: default_pass_through(),
            inventory_buffer_months: self.inventory_buffer_months.unwrap_or_default(),
        };
        // Input errors outrank elasticity errors.
        input.validate()?;

        let (pass_through_rate_percent, pass_through_source) =
            resolve_pass_through(self.pass_through_rate_percent, product.as_ref())?;
        input.pass_through_rate_percent = pass_through_rate_percent;

        Ok(ResolvedCalculation {
            input,
            pass_through_source,
            hs_code,
            product,
        })
    }
}
