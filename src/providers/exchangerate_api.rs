use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::snapshot::{BASE_CURRENCY, FetchFailure, RateSource, Snapshot};

/// Latest rates from an exchangerate-api compatible service (`/v4/latest/{base}`).
pub struct ExchangeRateApiProvider {
    base_url: String,
    base_currency: String,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            base_currency: BASE_CURRENCY.to_string(),
            timeout,
        }
    }

    fn url(&self) -> String {
        format!("{}/v4/latest/{}", self.base_url, self.base_currency)
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    base: String,
    date: String,
    rates: BTreeMap<String, serde_json::Value>,
}

impl LatestRatesResponse {
    fn into_snapshot(self) -> Snapshot {
        let rates = self
            .rates
            .into_iter()
            .filter_map(|(code, value)| match value.as_f64() {
                Some(rate) => Some((code, rate)),
                None => {
                    debug!(%code, %value, "Dropping non-numeric rate");
                    None
                }
            })
            .collect();
        Snapshot::new(self.base, self.date, rates)
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    #[instrument(
        name = "RateSnapshotFetch",
        skip(self),
        fields(base = %self.base_currency)
    )]
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchFailure> {
        let url = self.url();
        debug!("Requesting rate snapshot from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("ratesheet/1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchFailure::Network(e.to_string()))?;

        let response = client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout(self.timeout)
            } else {
                FetchFailure::Network(format!("{e} (URL: {url})"))
            }
        })?;

        debug!(response = ?response, "Received rate service response");

        if !response.status().is_success() {
            return Err(FetchFailure::Status(response.status().as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchFailure::Network(e.to_string()))?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| FetchFailure::Malformed(format!("{e} (URL: {url})")))?;

        Ok(data.into_snapshot())
    }
}
