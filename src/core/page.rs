//! The rates page: one snapshot, its rate table, the sort toggle and the status line.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::cancel::CancelSignal;
use super::chart::{self, ChartSeries};
use super::convert::{Conversion, ConversionForm, FormError};
use super::render::{self, RenderedTable};
use super::sink::{ChartSink, RowExporter, TableSink};
use super::snapshot::{FetchFailure, RateSource, Snapshot, fetch_with_deadline};
use super::table::RateTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Loaded,
    Failed,
}

/// Outcome of the latest fetch, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub message: String,
    pub success: bool,
}

impl Status {
    fn idle() -> Self {
        Status {
            message: "No rates loaded yet".to_string(),
            success: true,
        }
    }
}

pub struct RatesPage {
    phase: Phase,
    snapshot: Option<Snapshot>,
    table: RateTable,
    sort_descending: bool,
    initial_sort_descending: bool,
    fetch_timeout: Duration,
    status: Status,
}

impl RatesPage {
    pub fn new(fetch_timeout: Duration) -> Self {
        RatesPage {
            phase: Phase::Uninitialized,
            snapshot: None,
            table: RateTable::new(),
            sort_descending: true,
            initial_sort_descending: true,
            fetch_timeout,
            status: Status::idle(),
        }
    }

    pub fn with_sort_descending(mut self, descending: bool) -> Self {
        self.sort_descending = descending;
        self.initial_sort_descending = descending;
        self
    }

    /// Drops everything loaded so far, as a page reload would.
    pub fn reset(&mut self) {
        debug!("Resetting rates page");
        self.phase = Phase::Uninitialized;
        self.snapshot = None;
        self.table = RateTable::new();
        self.sort_descending = self.initial_sort_descending;
        self.status = Status::idle();
    }

    /// Fetches a fresh snapshot from `source`.
    ///
    /// A failure only updates the status; rates loaded earlier stay in place. The page
    /// ends up `Failed` when nothing was ever loaded, and stays there until [`reset`].
    ///
    /// [`reset`]: RatesPage::reset
    #[instrument(name = "RatesPageRefresh", skip_all)]
    pub async fn refresh(&mut self, source: &dyn RateSource, cancel: &CancelSignal) -> &Status {
        if self.phase == Phase::Failed {
            debug!("Rates page failed earlier, skipping fetch until reset");
            return &self.status;
        }

        let had_snapshot = self.snapshot.is_some();
        self.phase = Phase::Loading;

        match fetch_with_deadline(source, self.fetch_timeout, cancel).await {
            Ok(snapshot) => self.apply(snapshot),
            Err(failure) => self.fail(failure, had_snapshot),
        }
        &self.status
    }

    fn apply(&mut self, snapshot: Snapshot) {
        let mut table = RateTable::new();
        let count = table.load(&snapshot);
        if count == 0 {
            let had_snapshot = self.snapshot.is_some();
            self.fail(
                FetchFailure::Malformed("no usable rates in response".to_string()),
                had_snapshot,
            );
            return;
        }

        info!(count, base = %snapshot.base, date = %snapshot.date, "Loaded rate snapshot");
        self.status = Status {
            message: format!(
                "Rates loaded: {count} currencies (base {}, date {}, fetched {})",
                snapshot.base,
                snapshot.date,
                snapshot.fetched_at.format("%H:%M UTC")
            ),
            success: true,
        };
        self.table = table;
        self.snapshot = Some(snapshot);
        self.phase = Phase::Loaded;
    }

    fn fail(&mut self, failure: FetchFailure, had_snapshot: bool) {
        warn!(error = %failure, "Failed to fetch rates");
        self.status = Status {
            message: format!("Failed to fetch rates: {failure}"),
            success: false,
        };
        self.phase = if had_snapshot {
            Phase::Loaded
        } else {
            Phase::Failed
        };
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn sort_descending(&self) -> bool {
        self.sort_descending
    }

    /// Currency codes offered as conversion choices.
    pub fn currency_codes(&self) -> Vec<String> {
        self.table.codes()
    }

    pub fn render(&self) -> RenderedTable {
        render::render(&self.table, self.sort_descending)
    }

    /// Flips the sort direction and renders once with the new direction.
    pub fn toggle_sort(&mut self) -> RenderedTable {
        self.sort_descending = !self.sort_descending;
        debug!(descending = self.sort_descending, "Toggled sort direction");
        self.render()
    }

    /// Chart series over the table rows in currency code order.
    pub fn chart(&self) -> ChartSeries {
        chart::project(self.table.rows())
    }

    pub fn convert(&self, form: &ConversionForm) -> Result<Conversion, FormError> {
        let snapshot = self.snapshot.as_ref().ok_or(FormError::NoRates)?;
        form.submit(snapshot)
    }

    /// Hands the table, the chart and the rows to their collaborators, in that order.
    ///
    /// Does nothing when no rates are loaded. Returns the number of exported rows.
    pub fn publish(
        &self,
        tables: &mut dyn TableSink,
        charts: Option<&mut dyn ChartSink>,
        exporter: Option<&mut dyn RowExporter>,
    ) -> Result<Option<usize>> {
        if self.snapshot.is_none() {
            debug!("Nothing to publish");
            return Ok(None);
        }

        tables.show_table(&self.render())?;
        if let Some(charts) = charts {
            charts.show_chart(&self.chart())?;
        }
        match exporter {
            Some(exporter) => Ok(Some(exporter.export(self.table.rows())?)),
            None => Ok(None),
        }
    }
}
