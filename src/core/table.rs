//! In-memory rate table built from a snapshot.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use super::snapshot::Snapshot;

/// One exchange rate observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    pub currency_code: String,
    pub exchange_rate: f64,
    pub base_currency: String,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rows: Vec<RateRow>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every row with the usable rates of `snapshot` and returns how many were kept.
    ///
    /// The new row set is built in full before it is swapped in, so the table is
    /// never observed half loaded. Non-positive and non-finite rates are dropped.
    pub fn load(&mut self, snapshot: &Snapshot) -> usize {
        let rows: Vec<RateRow> = snapshot
            .rates
            .iter()
            .filter(|(_, rate)| rate.is_finite() && **rate > 0.0)
            .map(|(code, rate)| RateRow {
                currency_code: code.clone(),
                exchange_rate: *rate,
                base_currency: snapshot.base.clone(),
                date: snapshot.date.clone(),
            })
            .collect();

        let dropped = snapshot.rates.len() - rows.len();
        if dropped > 0 {
            debug!(dropped, "Excluded rates that are not positive");
        }

        self.rows = rows;
        self.rows.len()
    }

    /// All rows ordered by rate, ties broken by currency code ascending.
    pub fn query(&self, descending: bool) -> Vec<RateRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| compare_rows(a, b, descending));
        rows
    }

    /// Rows in currency code order.
    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn codes(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.currency_code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn compare_rows(a: &RateRow, b: &RateRow, descending: bool) -> Ordering {
    let by_rate = a.exchange_rate.total_cmp(&b.exchange_rate);
    let by_rate = if descending {
        by_rate.reverse()
    } else {
        by_rate
    };
    by_rate.then_with(|| a.currency_code.cmp(&b.currency_code))
}
