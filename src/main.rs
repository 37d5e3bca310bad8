use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratesheet::cli::interrupt::InterruptGuard;
use ratesheet::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ratesheet::AppCommand {
    fn from(cmd: Commands) -> ratesheet::AppCommand {
        match cmd {
            Commands::Rates {
                ascending,
                no_chart,
                export,
            } => ratesheet::AppCommand::Rates {
                ascending,
                chart: !no_chart,
                export,
            },
            Commands::Convert { amount, from, to } => {
                ratesheet::AppCommand::Convert { amount, from, to }
            }
            Commands::Shell => ratesheet::AppCommand::Shell,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the current exchange rate table and chart
    Rates {
        /// Sort rates in ascending order
        #[arg(short, long)]
        ascending: bool,

        /// Skip the bar chart
        #[arg(long)]
        no_chart: bool,

        /// Also write the rates to a CSV file
        #[arg(short, long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency to convert from (defaults to the configured one)
        from: Option<String>,
        /// Currency to convert to (defaults to the configured one)
        to: Option<String>,
    },
    /// Start an interactive session to sort, chart and convert
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratesheet::cli::setup::setup(),
        Some(cmd) => {
            let interrupts = InterruptGuard::default();
            interrupts.listen();
            ratesheet::run_command_with(cmd.into(), cli.config_path.as_deref(), &interrupts).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
