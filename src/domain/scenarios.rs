use serde::Serialize;
use std::collections::BTreeMap;

use super::Decimal;

/// Reference tariff rates per product category, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffScenarios {
    pub current_rates: BTreeMap<String, Decimal>,
    pub proposed_changes: BTreeMap<String, Decimal>,
}

impl TariffScenarios {
    /// Built-in scenario table.
    pub fn reference() -> Self {
        Self {
            current_rates: rates(&[
                ("Electronics", "2.5"),
                ("Metals", "3.0"),
                ("Agriculture", "5.0"),
                ("Machinery", "2.0"),
                ("Textiles", "8.0"),
                ("Chemicals", "3.5"),
            ]),
            proposed_changes: rates(&[
                ("Electronics", "25.0"),
                ("Metals", "10.0"),
                ("Agriculture", "15.0"),
            ]),
        }
    }
}

fn rates(entries: &[(&str, &str)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .filter_map(|(category, rate)| {
            Decimal::from_str_canonical(rate)
                .ok()
                .map(|r| (category.to_string(), r))
        })
        .collect()
}
