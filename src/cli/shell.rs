//! Interactive session over one rates page.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use super::interrupt::InterruptGuard;
use super::{chart, convert, table, ui};
use crate::core::config::ConverterDefaults;
use crate::core::{ConversionForm, Phase, RateSource, RatesPage};

const HELP: &str = "\
Commands:
  sort                      toggle ascending/descending rate order
  table                     show the rate table
  chart                     show the rate chart
  convert <amount> [from] [to]
                            convert an amount between two currencies
  codes                     list available currency codes
  status                    show the latest fetch status
  reload                    drop the current rates and fetch again
  help                      show this help
  quit                      leave the session";

enum Command {
    Sort,
    Table,
    Chart,
    Convert(ConversionForm),
    Codes,
    Status,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str, defaults: &ConverterDefaults) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()?.to_lowercase().as_str() {
        "sort" => Command::Sort,
        "table" => Command::Table,
        "chart" => Command::Chart,
        "convert" => {
            let amount = words.next().unwrap_or_default();
            let from = words.next().unwrap_or(defaults.from.as_str());
            let to = words.next().unwrap_or(defaults.to.as_str());
            Command::Convert(ConversionForm::new(amount, from, to))
        }
        "codes" => Command::Codes,
        "status" => Command::Status,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

/// Loads rates, then runs the session on stdin/stdout.
pub async fn run(
    page: &mut RatesPage,
    source: &dyn RateSource,
    defaults: &ConverterDefaults,
    interrupts: &InterruptGuard,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    reload(page, source, interrupts, &mut stdout, false).await?;
    writeln!(stdout, "Type 'help' for commands.")?;
    run_session(page, source, defaults, interrupts, stdin.lock(), &mut stdout).await
}

/// Reads one command per line from `input` until `quit` or end of input.
pub async fn run_session<R: BufRead, W: Write>(
    page: &mut RatesPage,
    source: &dyn RateSource,
    defaults: &ConverterDefaults,
    interrupts: &InterruptGuard,
    input: R,
    output: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line, defaults) else {
            continue;
        };

        match command {
            Command::Sort => {
                let rendered = page.toggle_sort();
                writeln!(output, "{}", table::format_table(&rendered))?;
            }
            Command::Table => writeln!(output, "{}", table::format_table(&page.render()))?,
            Command::Chart => write!(output, "{}", chart::draw_bars(&page.chart(), ui::term_width()))?,
            Command::Convert(form) => {
                writeln!(output, "{}", convert::conversion_text(page, &form))?;
            }
            Command::Codes => writeln!(output, "{}", page.currency_codes().join(" "))?,
            Command::Status => writeln!(output, "{}", ui::status_line(page.status()))?,
            Command::Reload => reload(page, source, interrupts, output, true).await?,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(word) => writeln!(
                output,
                "{}",
                ui::style_text(
                    &format!("Unknown command '{word}'. Type 'help' for commands."),
                    ui::StyleType::Error
                )
            )?,
        }
    }

    debug!("Session finished");
    Ok(())
}

async fn reload<W: Write>(
    page: &mut RatesPage,
    source: &dyn RateSource,
    interrupts: &InterruptGuard,
    output: &mut W,
    reset: bool,
) -> Result<()> {
    if reset {
        page.reset();
    }
    let status = super::load_rates(page, source, interrupts).await;
    writeln!(output, "{}", ui::status_line(&status))?;
    if page.phase() == Phase::Loaded {
        writeln!(output, "{}", table::format_table(&page.render()))?;
    }
    Ok(())
}
