//! Add command - record a new income

use crate::cmd::rate_source;
use crate::config::Settings;
use crate::context::Context;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct AddCommand {
    /// Date the income was received (YYYY-MM-DD)
    date: String,

    /// Three letter currency code of the income (e.g. USD)
    currency: String,

    /// Gross amount in that currency
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// Tax fraction owed on the converted amount (e.g. 0.05)
    #[arg(allow_hyphen_values = true)]
    tax: String,

    /// Use this rate instead of looking one up
    #[arg(short, long, value_parser = parse_rate)]
    rate: Option<Decimal>,
}

impl AddCommand {
    pub fn exec(&self, settings: Settings) -> anyhow::Result<()> {
        let rates = rate_source(&settings, self.rate)?;
        let mut ctx = Context::open(settings)?;
        let income = ctx.add_income(
            &self.date,
            &self.currency,
            &self.amount,
            &self.tax,
            rates.as_ref(),
        )?;
        println!("added #{}", income.id);
        Ok(())
    }
}

fn parse_rate(s: &str) -> Result<Decimal, String> {
    let rate: Decimal = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if rate <= Decimal::ZERO {
        return Err("rate must be positive".to_string());
    }
    Ok(rate)
}
