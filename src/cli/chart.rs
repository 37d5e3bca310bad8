use anyhow::Result;
use console::style;

use super::ui;
use crate::core::{ChartSeries, ChartSink};

const BAR: char = '█';
const SLIVER: char = '▏';

/// Draws a horizontal bar chart, one line per label, bars scaled from zero to the largest value.
pub fn draw_bars(series: &ChartSeries, width: usize) -> String {
    let Some(max) = series.max_value().filter(|max| *max > 0.0) else {
        return String::new();
    };

    let label_width = series.labels.iter().map(String::len).max().unwrap_or(0);
    let value_width = series
        .values
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(0);
    // Label, a space, the bar, a space, the value.
    let bar_width = width.saturating_sub(label_width + value_width + 2).max(10);

    let mut output = format!("{}\n", ui::style_text(&series.label, ui::StyleType::Title));
    for (label, value) in series.points() {
        let length = ((value / max) * bar_width as f64).round() as usize;
        let bar = if length == 0 {
            SLIVER.to_string()
        } else {
            BAR.to_string().repeat(length)
        };
        output.push_str(&format!(
            "{label:>label_width$} {} {value}\n",
            style(format!("{bar:<bar_width$}")).cyan()
        ));
    }
    output
}

/// Prints bar charts to stdout, sized to the terminal.
#[derive(Default)]
pub struct TerminalBarChart;

impl ChartSink for TerminalBarChart {
    fn show_chart(&mut self, series: &ChartSeries) -> Result<()> {
        if series.is_empty() {
            return Ok(());
        }
        ui::print_separator();
        print!("{}", draw_bars(series, ui::term_width()));
        Ok(())
    }
}
