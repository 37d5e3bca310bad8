pub mod chart;
pub mod convert;
pub mod interrupt;
pub mod rates;
pub mod setup;
pub mod shell;
pub mod table;
pub mod ui;

use crate::core::{RateSource, RatesPage, Status};
use interrupt::InterruptGuard;

/// Refreshes `page` behind a spinner. Ctrl-C cancels the request while it runs.
pub async fn load_rates(
    page: &mut RatesPage,
    source: &dyn RateSource,
    interrupts: &InterruptGuard,
) -> Status {
    let signal = interrupts.arm();
    let pb = ui::new_spinner("Fetching exchange rates...");
    let status = page.refresh(source, &signal).await.clone();
    pb.finish_and_clear();
    interrupts.disarm();

    status
}
