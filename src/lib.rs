pub mod cli;
pub mod core;
pub mod export;
pub mod providers;

use crate::cli::interrupt::InterruptGuard;
use crate::core::config::AppConfig;
use crate::core::{ConversionForm, RatesPage};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    Rates {
        ascending: bool,
        chart: bool,
        export: Option<PathBuf>,
    },
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
    Shell,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    run_command_with(command, config_path, &InterruptGuard::default()).await
}

/// Runs `command` with fetches cancellable through `interrupts`.
pub async fn run_command_with(
    command: AppCommand,
    config_path: Option<&str>,
    interrupts: &InterruptGuard,
) -> Result<()> {
    info!("ratesheet starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = providers::ExchangeRateApiProvider::new(
        &config.provider.base_url,
        config.provider.timeout(),
    );
    let mut page =
        RatesPage::new(config.provider.timeout()).with_sort_descending(config.sort_descending);

    match command {
        AppCommand::Rates {
            ascending,
            chart,
            export,
        } => {
            if ascending {
                page = page.with_sort_descending(false);
            }
            cli::rates::run(&mut page, &source, chart, export.as_deref(), interrupts).await
        }
        AppCommand::Convert { amount, from, to } => {
            let form = ConversionForm::new(
                amount,
                from.unwrap_or_else(|| config.defaults.from.clone()),
                to.unwrap_or_else(|| config.defaults.to.clone()),
            );
            cli::convert::run(&mut page, &source, &form, interrupts).await
        }
        AppCommand::Shell => {
            cli::shell::run(&mut page, &source, &config.defaults, interrupts).await
        }
    }
}
