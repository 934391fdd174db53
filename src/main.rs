mod cmd;
mod config;
mod context;
mod core;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "incomeledger",
    version,
    about = "Record foreign currency income and report tax by month, quarter and year"
)]
struct Cli {
    /// Settings file (defaults to <config dir>/incomeledger/config.toml)
    #[arg(long, global = true, env = "INCOMELEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Ledger database file, overrides the settings file
    #[arg(long, global = true, env = "INCOMELEDGER_DB")]
    db: Option<PathBuf>,

    /// Local currency code, overrides the settings file
    #[arg(long, global = true, env = "INCOMELEDGER_LOCAL_CURRENCY")]
    local_currency: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an income, converted at the rate of its date
    Add(cmd::add::AddCommand),
    /// Remove an income by id
    Remove(cmd::remove::RemoveCommand),
    /// Show incomes and totals per month, quarter and year
    Print(cmd::print::PrintCommand),
    /// Export incomes as CSV
    Export(cmd::export::ExportCommand),
    /// Look up the conversion rate for a date and currency
    Rate(cmd::rate::RateCommand),
}

impl Cli {
    fn settings(&self) -> anyhow::Result<config::Settings> {
        let mut settings = config::Settings::load(self.config.as_deref())?;
        if let Some(db) = &self.db {
            settings.database = db.clone();
        }
        if let Some(code) = &self.local_currency {
            settings.local_currency = code.parse()?;
        }
        log::debug!("{:?}", settings);
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    match &cli.command {
        Command::Add(add) => add.exec(settings),
        Command::Remove(remove) => remove.exec(settings),
        Command::Print(print) => print.exec(settings),
        Command::Export(export) => export.exec(settings),
        Command::Rate(rate) => rate.exec(settings),
    }
}
