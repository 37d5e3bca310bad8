//! Collaborators that draw or export what the rates page produces.

use anyhow::Result;

use super::chart::ChartSeries;
use super::render::RenderedTable;
use super::table::RateRow;

pub trait TableSink {
    fn show_table(&mut self, table: &RenderedTable) -> Result<()>;
}

pub trait ChartSink {
    fn show_chart(&mut self, series: &ChartSeries) -> Result<()>;
}

pub trait RowExporter {
    /// Returns the number of rows written.
    fn export(&mut self, rows: &[RateRow]) -> Result<usize>;
}
