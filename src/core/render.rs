//! Sorted table rendering.

use super::table::{RateRow, RateTable};

pub const CURRENCY_TITLE: &str = "Currency";
pub const RATE_TITLE: &str = "Exchange Rate";
pub const BASE_TITLE: &str = "Base Currency";
pub const DATE_TITLE: &str = "Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortHeader {
    pub descending: bool,
}

impl SortHeader {
    pub fn glyph(&self) -> char {
        if self.descending { '▼' } else { '▲' }
    }

    /// Column titles, with the sort glyph on the rate column.
    pub fn titles(&self) -> [String; 4] {
        [
            CURRENCY_TITLE.to_string(),
            format!("{RATE_TITLE} {}", self.glyph()),
            BASE_TITLE.to_string(),
            DATE_TITLE.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub header: SortHeader,
    pub rows: Vec<RateRow>,
}

pub fn render(table: &RateTable, descending: bool) -> RenderedTable {
    RenderedTable {
        header: SortHeader { descending },
        rows: table.query(descending),
    }
}
