//! Backtesting terminal CLI.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    setup_logging(log_level, cli.json_logs);

    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, cli.config.as_deref()),
        Commands::Portfolio(args) => cli::commands::portfolio::run(args, cli.config.as_deref()),
        Commands::Advise(args) => cli::commands::advise::run(args, cli.config.as_deref()),
        Commands::Signals => cli::commands::signals::run(),
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref()),
    }
}
