use crate::domain::{Decimal, ElasticityPair};

use super::CalcError;

/// Pass-through percent assumed when no product-specific data exists.
pub const DEFAULT_PASS_THROUGH_PERCENT: i64 = 75;

pub fn default_pass_through() -> Decimal {
    Decimal::from_i64(DEFAULT_PASS_THROUGH_PERCENT)
}

/// Clamp a pass-through percent to [0, 100].
pub fn clamp_pass_through(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::zero(), Decimal::hundred())
}

/// Derive the consumer pass-through percent from an elasticity pair.
///
/// Uses the incidence split `supply / (supply + |demand|) * 100`. Without
/// elasticity data the default of 75 is returned. The result is clamped to
/// [0, 100] so that sign-inverted inputs cannot produce an out-of-range
/// share.
///
/// # Errors
/// `InvalidElasticity` when `supply + |demand|` is zero (0/0).
pub fn derive_pass_through(elasticity: Option<&ElasticityPair>) -> Result<Decimal, CalcError> {
    let Some(pair) = elasticity else {
        return Ok(default_pass_through());
    };

    let total = pair
        .supply
        .checked_add(pair.demand.abs())
        .ok_or_else(|| CalcError::InvalidElasticity("elasticities out of range".to_string()))?;
    if total.is_zero() {
        return Err(CalcError::InvalidElasticity(
            "supply + |demand| is zero".to_string(),
        ));
    }

    let share = pair
        .supply
        .checked_div(total)
        .and_then(|s| s.checked_mul(Decimal::hundred()))
        .ok_or_else(|| CalcError::InvalidElasticity("elasticities out of range".to_string()))?;

    Ok(clamp_pass_through(share))
}
