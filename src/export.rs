//! CSV export of rate rows for spreadsheets.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{RateRow, RowExporter};

/// Writes rows as `currency_code,exchange_rate,base_currency,date` records.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvExporter {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowExporter for CsvExporter {
    fn export(&mut self, rows: &[RateRow]) -> Result<usize> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create export file: {}", self.path.display()))?;
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to write row for {}", row.currency_code))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write export file: {}", self.path.display()))?;

        debug!(rows = rows.len(), path = %self.path.display(), "Exported rates");
        Ok(rows.len())
    }
}
