use anyhow::Result;
use comfy_table::Cell;

use super::ui;
use crate::core::{RenderedTable, TableSink};

/// Formats a rendered rate table for the terminal.
pub fn format_table(rendered: &RenderedTable) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(
        rendered
            .header
            .titles()
            .iter()
            .map(|title| ui::header_cell(title))
            .collect::<Vec<_>>(),
    );

    for row in &rendered.rows {
        table.add_row(vec![
            Cell::new(&row.currency_code),
            ui::number_cell(row.exchange_rate.to_string()),
            Cell::new(&row.base_currency),
            Cell::new(&row.date),
        ]);
    }

    table.to_string()
}

/// Prints rate tables to stdout.
#[derive(Default)]
pub struct TerminalTable;

impl TableSink for TerminalTable {
    fn show_table(&mut self, table: &RenderedTable) -> Result<()> {
        println!("{}", format_table(table));
        Ok(())
    }
}
