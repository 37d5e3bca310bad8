//! Projection of rate rows into a chart series.

use serde::Serialize;

use super::table::RateRow;

pub const SERIES_LABEL: &str = "Exchange Rate";

/// Parallel label/value vectors: `labels[i]` belongs to `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Keeps the order of `rows`.
pub fn project(rows: &[RateRow]) -> ChartSeries {
    let (labels, values) = rows
        .iter()
        .map(|row| (row.currency_code.clone(), row.exchange_rate))
        .unzip();

    ChartSeries {
        label: SERIES_LABEL.to_string(),
        labels,
        values,
    }
}
