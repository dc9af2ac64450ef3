//! Pure computation engine for tariff impact estimates.
//!
//! Everything here is synchronous and side-effect free: no I/O, no shared
//! state, no logging. Identical inputs always produce identical results.

use serde::{Deserialize, Serialize};

use crate::domain::Decimal;

pub mod error;
pub mod impact;
pub mod pass_through;

pub use error::{CalcError, InputField};
pub use impact::{
    clamp_inventory_months, compute_impact, future_price, import_cost, inventory_adjusted_impact,
    price_increase_percent, tariff_amount, tariff_passed_to_consumer,
    tariff_tax_percent_of_future_price, FULL_BUFFER_MONTHS,
};
pub use pass_through::{
    clamp_pass_through, default_pass_through, derive_pass_through, DEFAULT_PASS_THROUGH_PERCENT,
};

/// Canonical engine input. All values are caller-chosen; nothing is read
/// from hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Current consumer-facing price, dollars. Must be > 0.
    pub retail_price: Decimal,
    /// Markup over import cost, percent. Must be > -100.
    pub retail_markup_percent: Decimal,
    /// Duty rate, percent. Must be >= 0.
    pub tariff_rate_percent: Decimal,
    /// Share of the tariff passed to consumers, percent. Clamped to [0, 100].
    pub pass_through_rate_percent: Decimal,
    /// Months of pre-tariff stock. Clamped to [0, 12].
    pub inventory_buffer_months: Decimal,
}

impl CalculationInput {
    /// Check every hard constraint before any arithmetic runs.
    ///
    /// Pass-through and inventory values are never rejected; they are
    /// clamped by the steps that use them.
    pub fn validate(&self) -> Result<(), CalcError> {
        if !self.retail_price.is_positive() {
            return Err(CalcError::invalid(
                InputField::RetailPrice,
                "must be greater than 0",
            ));
        }
        if self.retail_markup_percent <= -Decimal::hundred() {
            return Err(CalcError::invalid(
                InputField::RetailMarkupPercent,
                "must be greater than -100",
            ));
        }
        if self.tariff_rate_percent.is_negative() {
            return Err(CalcError::invalid(
                InputField::TariffRatePercent,
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Derived metrics at full precision. Dollars unless the name says percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub import_cost: Decimal,
    pub tariff_amount: Decimal,
    pub tariff_passed_to_consumer: Decimal,
    pub future_price: Decimal,
    pub tariff_tax_percent_of_future_price: Decimal,
    pub price_increase_percent: Decimal,
    pub inventory_adjusted_initial_impact: Decimal,
}

impl CalculationResult {
    /// Presentation rounding: dollars to 2 places, percents to 1.
    pub fn rounded_for_display(&self) -> Self {
        Self {
            import_cost: self.import_cost.round_half_up(2),
            tariff_amount: self.tariff_amount.round_half_up(2),
            tariff_passed_to_consumer: self.tariff_passed_to_consumer.round_half_up(2),
            future_price: self.future_price.round_half_up(2),
            tariff_tax_percent_of_future_price: self
                .tariff_tax_percent_of_future_price
                .round_half_up(1),
            price_increase_percent: self.price_increase_percent.round_half_up(1),
            inventory_adjusted_initial_impact: self
                .inventory_adjusted_initial_impact
                .round_half_up(2),
        }
    }
}
