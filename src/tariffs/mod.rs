//! Tariff-rate sources: fetching the Harmonized Tariff Schedule and
//! extracting duty rates for HS codes.

use async_trait::async_trait;
use std::fmt;

pub mod mock;
pub mod schedule;
pub mod usitc;

pub use mock::MockTariffRateSource;
pub use schedule::{parse_rate, HtsRecord, HtsSchedule};
pub use usitc::UsitcHtsSource;

/// Source of official tariff rates.
///
/// Implementations handle retry/backoff themselves; a returned error is
/// final for this attempt.
#[async_trait]
pub trait TariffRateSource: Send + Sync + fmt::Debug {
    /// Fetch the whole schedule once.
    async fn fetch_schedule(&self) -> Result<HtsSchedule, TariffSourceError>;

    /// Human-readable name of the dataset, reported alongside rates.
    fn data_source(&self) -> &str;
}

/// Error type for tariff-rate source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TariffSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 404 dataset moved, 5xx server error)
    HttpError { status: u16, message: String },
    /// Body was not JSON or not shaped like a schedule
    ParseError(String),
    /// Rate limit exceeded after retries
    RateLimited,
    Other(String),
}

impl fmt::Display for TariffSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TariffSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            TariffSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            TariffSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            TariffSourceError::RateLimited => write!(f, "Rate limited"),
            TariffSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TariffSourceError {}
