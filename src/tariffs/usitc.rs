//! USITC Harmonized Tariff Schedule client.

use super::{HtsSchedule, TariffRateSource, TariffSourceError};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_HTS_URL: &str =
    "https://www.usitc.gov/sites/default/files/tata/hts/hts_2024_basic_edition_json.json";

pub const DATA_SOURCE: &str = "USITC HTS 2024";

/// Tariff-rate source downloading the HTS JSON edition published by the
/// US International Trade Commission.
#[derive(Debug, Clone)]
pub struct UsitcHtsSource {
    client: Client,
    url: String,
    max_elapsed: Duration,
}

impl UsitcHtsSource {
    /// Create a source for `url`, with `timeout` applied to each request.
    pub fn new(url: String, timeout: Duration) -> Result<Self, TariffSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TariffSourceError::Other(e.to_string()))?;

        Ok(Self {
            client,
            url,
            max_elapsed: Duration::from_secs(60),
        })
    }

    /// Bound the total time spent retrying transient failures.
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_json(&self) -> Result<serde_json::Value, TariffSourceError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self.client.get(&self.url).send().await.map_err(|e| {
                backoff::Error::transient(TariffSourceError::NetworkError(e.to_string()))
            })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(TariffSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(TariffSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(TariffSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response.json::<serde_json::Value>().await.map_err(|e| {
                backoff::Error::permanent(TariffSourceError::ParseError(e.to_string()))
            })
        })
        .await
    }
}

#[async_trait]
impl TariffRateSource for UsitcHtsSource {
    async fn fetch_schedule(&self) -> Result<HtsSchedule, TariffSourceError> {
        debug!("Fetching HTS schedule from {}", self.url);

        let doc = self.get_json().await?;
        let schedule = HtsSchedule::from_json(&doc)?;

        info!("Fetched HTS schedule with {} records", schedule.len());
        Ok(schedule)
    }

    fn data_source(&self) -> &str {
        DATA_SOURCE
    }
}
