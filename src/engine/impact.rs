//! Step functions of the impact pipeline and their composition.

use crate::domain::Decimal;

use super::pass_through::clamp_pass_through;
use super::{CalcError, CalculationInput, CalculationResult, InputField};

/// Months of inventory that fully absorb the immediate price shock.
pub const FULL_BUFFER_MONTHS: i64 = 12;

fn full_buffer() -> Decimal {
    Decimal::from_i64(FULL_BUFFER_MONTHS)
}

/// Clamp an inventory buffer to [0, 12] months.
pub fn clamp_inventory_months(months: Decimal) -> Decimal {
    months.clamp(Decimal::zero(), full_buffer())
}

/// `part / whole * 100`, `None` on a zero divisor or overflow.
fn ratio_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::hundred()))
}

/// `value * percent / 100`.
fn percent_of(value: Decimal, percent: Decimal) -> Option<Decimal> {
    (percent / Decimal::hundred()).checked_mul(value)
}

/// Reconstruct the import cost by inverting the retail markup:
/// `retail_price / (1 + markup_percent / 100)`.
pub fn import_cost(retail_price: Decimal, markup_percent: Decimal) -> Result<Decimal, CalcError> {
    if !retail_price.is_positive() {
        return Err(CalcError::invalid(
            InputField::RetailPrice,
            "must be greater than 0",
        ));
    }
    if markup_percent <= -Decimal::hundred() {
        return Err(CalcError::invalid(
            InputField::RetailMarkupPercent,
            "must be greater than -100",
        ));
    }

    let divisor = Decimal::one()
        .checked_add(markup_percent / Decimal::hundred())
        .ok_or_else(|| CalcError::out_of_range(InputField::RetailMarkupPercent))?;
    retail_price
        .checked_div(divisor)
        .ok_or_else(|| CalcError::out_of_range(InputField::RetailMarkupPercent))
}

/// Duty owed on the import cost: `import_cost * tariff_rate_percent / 100`.
pub fn tariff_amount(import_cost: Decimal, tariff_rate_percent: Decimal) -> Result<Decimal, CalcError> {
    if import_cost.is_negative() {
        return Err(CalcError::invalid(
            InputField::ImportCost,
            "must not be negative",
        ));
    }
    if tariff_rate_percent.is_negative() {
        return Err(CalcError::invalid(
            InputField::TariffRatePercent,
            "must not be negative",
        ));
    }

    percent_of(import_cost, tariff_rate_percent)
        .ok_or_else(|| CalcError::out_of_range(InputField::TariffRatePercent))
}

/// Portion of the tariff shifted onto the consumer. The rate is clamped to
/// [0, 100] first, so the result never exceeds `tariff_amount`.
pub fn tariff_passed_to_consumer(tariff_amount: Decimal, pass_through_percent: Decimal) -> Decimal {
    let clamped = clamp_pass_through(pass_through_percent);
    tariff_amount * (clamped / Decimal::hundred())
}

/// Retail price after the passed-through tariff. A negative pass-through is
/// treated as zero.
pub fn future_price(retail_price: Decimal, tariff_passed: Decimal) -> Result<Decimal, CalcError> {
    let increase = tariff_passed.max(Decimal::zero());
    retail_price
        .checked_add(increase)
        .ok_or_else(|| CalcError::out_of_range(InputField::RetailPrice))
}

/// Share of the future price that is tariff, in percent; 0 when the future
/// price is not positive.
pub fn tariff_tax_percent_of_future_price(tariff_passed: Decimal, future_price: Decimal) -> Decimal {
    if !future_price.is_positive() {
        return Decimal::zero();
    }
    ratio_percent(tariff_passed, future_price).unwrap_or_else(Decimal::zero)
}

/// Price increase relative to the current retail price, in percent.
pub fn price_increase_percent(tariff_passed: Decimal, retail_price: Decimal) -> Result<Decimal, CalcError> {
    if !retail_price.is_positive() {
        return Err(CalcError::invalid(
            InputField::RetailPrice,
            "must be greater than 0",
        ));
    }
    ratio_percent(tariff_passed, retail_price)
        .ok_or_else(|| CalcError::out_of_range(InputField::RetailPrice))
}

/// Price increase landing today given `inventory_months` of pre-tariff
/// stock: a linear ramp where 0 months means the whole increase and 12
/// months means none of it.
pub fn inventory_adjusted_impact(inventory_months: Decimal, full_price_increase: Decimal) -> Decimal {
    let months = clamp_inventory_months(inventory_months);
    let remaining = Decimal::one() - months / full_buffer();
    full_price_increase * remaining
}

/// Run the whole pipeline for one input.
///
/// Validation happens before any arithmetic; steps run in a fixed order and
/// each only sees the outputs of earlier steps.
pub fn compute_impact(input: &CalculationInput) -> Result<CalculationResult, CalcError> {
    input.validate()?;

    let import_cost = import_cost(input.retail_price, input.retail_markup_percent)?;
    let tariff_amount = tariff_amount(import_cost, input.tariff_rate_percent)?;
    let tariff_passed = tariff_passed_to_consumer(tariff_amount, input.pass_through_rate_percent);
    let future_price = future_price(input.retail_price, tariff_passed)?;
    let tax_percent = tariff_tax_percent_of_future_price(tariff_passed, future_price);
    let increase_percent = price_increase_percent(tariff_passed, input.retail_price)?;
    let initial_impact = inventory_adjusted_impact(input.inventory_buffer_months, tariff_passed);

    Ok(CalculationResult {
        import_cost,
        tariff_amount,
        tariff_passed_to_consumer: tariff_passed,
        future_price,
        tariff_tax_percent_of_future_price: tax_percent,
        price_increase_percent: increase_percent,
        inventory_adjusted_initial_impact: initial_impact,
    })
}
