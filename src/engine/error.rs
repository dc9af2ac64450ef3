use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Input field named by an [`CalcError::InvalidInput`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    RetailPrice,
    RetailMarkupPercent,
    TariffRatePercent,
    ImportCost,
    PassThroughRatePercent,
    InventoryBufferMonths,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::RetailPrice => "retailPrice",
            InputField::RetailMarkupPercent => "retailMarkupPercent",
            InputField::TariffRatePercent => "tariffRatePercent",
            InputField::ImportCost => "importCost",
            InputField::PassThroughRatePercent => "passThroughRatePercent",
            InputField::InventoryBufferMonths => "inventoryBufferMonths",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure of the impact engine. No partial results accompany it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: InputField, reason: String },
    #[error("invalid elasticity: {0}")]
    InvalidElasticity(String),
}

impl CalcError {
    pub fn invalid(field: InputField, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(field: InputField) -> Self {
        Self::invalid(field, "value is too large to compute with")
    }

    /// The offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<InputField> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(*field),
            CalcError::InvalidElasticity(_) => None,
        }
    }
}
