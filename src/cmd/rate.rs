//! Rate command - show the rate `add` would use

use crate::cmd::rate_source;
use crate::config::Settings;
use crate::core::{resolve_rate, CurrencyCode, LedgerError, DATE_FORMAT};
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct RateCommand {
    /// Date of the rate (YYYY-MM-DD)
    date: String,

    /// Three letter currency code (e.g. USD)
    currency: String,
}

impl RateCommand {
    pub fn exec(&self, settings: Settings) -> anyhow::Result<()> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| LedgerError::InvalidDate(self.date.clone()))?;
        let currency: CurrencyCode = self.currency.parse()?;

        let rates = rate_source(&settings, None)?;
        let rate = resolve_rate(rates.as_ref(), date, &currency, &settings.local_currency)?;
        println!(
            "{}: 1 {} = {} {}",
            date, currency, rate, settings.local_currency
        );
        Ok(())
    }
}
