//! Exchange-rate snapshots and the source abstraction that produces them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::cancel::CancelSignal;

/// Every snapshot is quoted against this currency.
pub const BASE_CURRENCY: &str = "USD";

/// One fetched set of exchange rates for a base currency and date.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub base: String,
    pub date: String,
    /// Units of each currency per 1 unit of `base`.
    pub rates: BTreeMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(
        base: impl Into<String>,
        date: impl Into<String>,
        rates: BTreeMap<String, f64>,
    ) -> Self {
        Snapshot {
            base: base.into(),
            date: date.into(),
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the rate for `code` if it is present and usable (positive and finite).
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request cancelled")]
    Cancelled,
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchFailure>;
}

/// Runs one fetch bounded by `timeout` and aborted as soon as `cancel` fires.
pub async fn fetch_with_deadline(
    source: &dyn RateSource,
    timeout: Duration,
    cancel: &CancelSignal,
) -> Result<Snapshot, FetchFailure> {
    if cancel.is_cancelled() {
        return Err(FetchFailure::Cancelled);
    }

    tokio::select! {
        result = tokio::time::timeout(timeout, source.fetch_snapshot()) => {
            result.unwrap_or_else(|_| {
                debug!(?timeout, "Snapshot fetch exceeded deadline");
                Err(FetchFailure::Timeout(timeout))
            })
        }
        _ = cancel.cancelled() => {
            debug!("Snapshot fetch cancelled");
            Err(FetchFailure::Cancelled)
        }
    }
}
