//! Domain primitives: HsCode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Harmonized System code in canonical form (digits only, e.g. "854430").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HsCode(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HsCodeError {
    #[error("HS code is empty")]
    Empty,
    #[error("HS code contains a non-digit character: {0:?}")]
    NonDigit(char),
    #[error("HS code must have between 2 and 10 digits, got {0}")]
    Length(usize),
}

impl HsCode {
    pub const MIN_DIGITS: usize = 2;
    pub const MAX_DIGITS: usize = 10;

    /// Parse and normalize an external spelling.
    ///
    /// Whitespace around the code is trimmed and the `.`, ` ` and `-`
    /// separators used by tariff schedules are dropped, so "8544.30" and
    /// "8544 30" both become "854430".
    pub fn parse(raw: &str) -> Result<Self, HsCodeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HsCodeError::Empty);
        }

        let mut digits = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | ' ' | '-' => {}
                other => return Err(HsCodeError::NonDigit(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(HsCodeError::Length(digits.len()));
        }
        Ok(HsCode(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The international six-digit subheading (or the whole code when shorter).
    pub fn subheading(&self) -> &str {
        &self.0[..self.0.len().min(6)]
    }
}

impl fmt::Display for HsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HsCode {
    type Err = HsCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HsCode {
    type Error = HsCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HsCode> for String {
    fn from(value: HsCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let code = HsCode::parse("854430").unwrap();
        assert_eq!(code.as_str(), "854430");
    }

    #[test]
    fn test_parse_strips_separators() {
        assert_eq!(HsCode::parse(" 8544.30 ").unwrap().as_str(), "854430");
        assert_eq!(HsCode::parse("8544 30").unwrap().as_str(), "854430");
        assert_eq!(HsCode::parse("8544.30.00-00").unwrap().as_str(), "8544300000");
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert_eq!(HsCode::parse("85A430"), Err(HsCodeError::NonDigit('A')));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(HsCode::parse(""), Err(HsCodeError::Empty));
        assert_eq!(HsCode::parse("8"), Err(HsCodeError::Length(1)));
        assert_eq!(HsCode::parse("85443000001"), Err(HsCodeError::Length(11)));
        assert_eq!(HsCode::parse(".."), Err(HsCodeError::Length(0)));
    }

    #[test]
    fn test_subheading() {
        assert_eq!(HsCode::parse("8544300000").unwrap().subheading(), "854430");
        assert_eq!(HsCode::parse("8544").unwrap().subheading(), "8544");
    }

    #[test]
    fn test_serde_normalizes() {
        let code: HsCode = serde_json::from_str("\"8544.30\"").unwrap();
        assert_eq!(code.as_str(), "854430");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"854430\"");
        assert!(serde_json::from_str::<HsCode>("\"abc\"").is_err());
    }
}
