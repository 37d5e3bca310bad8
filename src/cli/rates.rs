use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::chart::TerminalBarChart;
use super::interrupt::InterruptGuard;
use super::table::TerminalTable;
use super::ui;
use crate::core::{ChartSink, Phase, RateSource, RatesPage, RowExporter};
use crate::export::CsvExporter;

/// Fetches rates once, then prints the status, the table and the chart, and exports the rows.
pub async fn run(
    page: &mut RatesPage,
    source: &dyn RateSource,
    show_chart: bool,
    export_path: Option<&Path>,
    interrupts: &InterruptGuard,
) -> Result<()> {
    let status = super::load_rates(page, source, interrupts).await;
    println!("{}", ui::status_line(&status));
    if page.phase() != Phase::Loaded {
        return Ok(());
    }

    let mut tables = TerminalTable;
    let mut charts = TerminalBarChart;
    let mut exporter = export_path.map(CsvExporter::new);

    let exported = page.publish(
        &mut tables,
        show_chart.then_some(&mut charts as &mut dyn ChartSink),
        exporter.as_mut().map(|e| e as &mut dyn RowExporter),
    )?;

    if let (Some(count), Some(exporter)) = (exported, &exporter) {
        info!(count, "Export finished");
        println!(
            "\n{}",
            ui::style_text(
                &format!("Exported {count} rates to {}", exporter.path().display()),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
