//! Mock tariff-rate source for testing without network calls.

use super::{HtsRecord, HtsSchedule, TariffRateSource, TariffSourceError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock source that returns a predefined schedule or a predefined error.
#[derive(Debug, Clone, Default)]
pub struct MockTariffRateSource {
    records: Vec<HtsRecord>,
    failure: Option<TariffSourceError>,
    fetches: Arc<AtomicUsize>,
}

impl MockTariffRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schedule line with a raw rate cell such as `"5%"` or `"Free"`.
    pub fn with_rate(mut self, code: &str, rate: impl Into<serde_json::Value>) -> Self {
        self.records.push(HtsRecord {
            code: code.chars().filter(char::is_ascii_digit).collect(),
            rate: rate.into(),
        });
        self
    }

    /// Make every fetch fail with `error`.
    pub fn failing(mut self, error: TariffSourceError) -> Self {
        self.failure = Some(error);
        self
    }

    /// How many times the schedule was fetched.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TariffRateSource for MockTariffRateSource {
    async fn fetch_schedule(&self) -> Result<HtsSchedule, TariffSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(HtsSchedule::new(self.records.clone())),
        }
    }

    fn data_source(&self) -> &str {
        "mock"
    }
}
