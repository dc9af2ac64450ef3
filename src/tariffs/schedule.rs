//! Harmonized Tariff Schedule records and rate extraction.
//!
//! Published schedules are not consistent about field names, so each record
//! is normalized on the way in: the code is read from the first of
//! [`CODE_FIELDS`] that is present and the rate from the first of
//! [`RATE_FIELDS`].

use serde_json::Value;

use super::TariffSourceError;
use crate::domain::{Decimal, HsCode};

pub const CODE_FIELDS: [&str; 4] = ["htsno", "hts_number", "hs_code", "product_code"];
pub const RATE_FIELDS: [&str; 4] = ["general", "duty_rate", "tariff_rate", "rate"];

/// One schedule line: a digits-only code and its raw rate value.
#[derive(Debug, Clone, PartialEq)]
pub struct HtsRecord {
    pub code: String,
    pub rate: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtsSchedule {
    records: Vec<HtsRecord>,
}

impl HtsSchedule {
    pub fn new(records: Vec<HtsRecord>) -> Self {
        Self { records }
    }

    /// Build a schedule from a JSON document: either a top-level array of
    /// records or an object with a `data` array. Records without a code are
    /// dropped.
    pub fn from_json(doc: &Value) -> Result<Self, TariffSourceError> {
        let items = doc
            .as_array()
            .or_else(|| doc.get("data").and_then(Value::as_array))
            .ok_or_else(|| {
                TariffSourceError::ParseError(
                    "expected an array of records or a `data` array".to_string(),
                )
            })?;

        let records = items
            .iter()
            .filter_map(|item| {
                let code = first_field(item, &CODE_FIELDS).and_then(code_digits)?;
                let rate = first_field(item, &RATE_FIELDS)
                    .cloned()
                    .unwrap_or(Value::Null);
                Some(HtsRecord { code, rate })
            })
            .collect();

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current duty rate (percent) for an HS code.
    ///
    /// A record matches when its code starts with the query's six-digit
    /// subheading. Records whose rate cannot be parsed are skipped and the
    /// scan continues.
    pub fn find_rate(&self, hs_code: &HsCode) -> Option<Decimal> {
        let prefix = hs_code.subheading();
        self.records
            .iter()
            .filter(|r| r.code.starts_with(prefix))
            .find_map(|r| parse_rate(&r.rate))
    }
}

fn first_field<'a>(item: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|f| item.get(*f))
        .find(|v| !v.is_null())
}

fn code_digits(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

/// Parse a schedule rate cell into a percent.
///
/// Numbers are taken as-is. Strings: "FREE" / "DUTY FREE" (any case) mean 0
/// and a `%` suffix is dropped. Anything else (specific duties such as
/// "6.8¢/kg", blanks) yields `None`.
pub fn parse_rate(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str_canonical(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => {
            let rate = s.trim().to_ascii_uppercase();
            match rate.as_str() {
                "FREE" | "DUTY FREE" => Some(Decimal::zero()),
                other => {
                    let numeric = other.strip_suffix('%').unwrap_or(other).trim();
                    Decimal::from_str_canonical(numeric).ok()
                }
            }
        }
        _ => None,
    }
}
