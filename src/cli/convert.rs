use anyhow::Result;

use super::interrupt::InterruptGuard;
use super::ui;
use crate::core::{ConversionForm, Phase, RateSource, RatesPage};

/// Fetches rates and prints one conversion, or guidance when the input cannot be converted.
pub async fn run(
    page: &mut RatesPage,
    source: &dyn RateSource,
    form: &ConversionForm,
    interrupts: &InterruptGuard,
) -> Result<()> {
    let status = super::load_rates(page, source, interrupts).await;
    if page.phase() != Phase::Loaded {
        println!("{}", ui::status_line(&status));
        return Ok(());
    }

    println!("{}", conversion_text(page, form));
    Ok(())
}

/// The result line for `form`, or the guidance that replaces it.
pub fn conversion_text(page: &RatesPage, form: &ConversionForm) -> String {
    match page.convert(form) {
        Ok(conversion) => ui::style_text(&conversion.to_string(), ui::StyleType::Success),
        Err(e) => ui::style_text(&e.guidance(), ui::StyleType::Error),
    }
}
