//! Core rate handling: snapshots, the rate table, conversion, rendering and the page lifecycle.

pub mod cancel;
pub mod chart;
pub mod config;
pub mod convert;
pub mod log;
pub mod page;
pub mod render;
pub mod sink;
pub mod snapshot;
pub mod table;

// Re-export main types for cleaner imports
pub use cancel::{CancelHandle, CancelSignal, cancel_pair};
pub use chart::ChartSeries;
pub use convert::{Conversion, ConversionError, ConversionForm, FormError, convert};
pub use page::{Phase, RatesPage, Status};
pub use render::{RenderedTable, SortHeader};
pub use sink::{ChartSink, RowExporter, TableSink};
pub use snapshot::{BASE_CURRENCY, FetchFailure, RateSource, Snapshot};
pub use table::{RateRow, RateTable};
