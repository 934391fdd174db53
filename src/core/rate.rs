use super::currency::CurrencyCode;
use super::error::LedgerError;
use super::money::parse_lenient;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::time::Duration;

/// Daily conversion rates from a foreign currency into the local currency.
pub trait RateSource {
    fn rate(&self, date: NaiveDate, currency: &CurrencyCode) -> Result<Decimal, LedgerError>;
}

/// Resolve the rate for `currency` at `date`. The local currency is always exactly `1`
/// and never reaches the source.
pub fn resolve_rate<S: RateSource + ?Sized>(
    source: &S,
    date: NaiveDate,
    currency: &CurrencyCode,
    local_currency: &CurrencyCode,
) -> Result<Decimal, LedgerError> {
    if currency == local_currency {
        return Ok(dec!(1));
    }
    source.rate(date, currency)
}

/// Rates fetched from the NBU statistics API, one request per lookup.
pub struct NbuRates {
    http: reqwest::blocking::Client,
    api: String,
}

impl NbuRates {
    pub fn new(api: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("incomeledger/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(NbuRates::with_client(http, api))
    }

    fn with_client(http: reqwest::blocking::Client, api: impl Into<String>) -> Self {
        NbuRates {
            http,
            api: api.into(),
        }
    }

    /// The raw table, entries left untyped. Only the matching entry is ever inspected.
    fn fetch(&self, date: NaiveDate) -> Result<Vec<Value>, reqwest::Error> {
        let url = format!("{}?date={}&json", self.api, date.format("%Y%m%d"));
        log::debug!("Requesting rates: {}", url);
        self.http
            .get(&url)
            .send()?
            .error_for_status()?
            .json()
    }
}

impl RateSource for NbuRates {
    fn rate(&self, date: NaiveDate, currency: &CurrencyCode) -> Result<Decimal, LedgerError> {
        let unavailable = || LedgerError::RateUnavailable {
            currency: currency.to_string(),
            date,
        };
        let entries = self.fetch(date).map_err(|err| {
            log::warn!("Rate lookup for {} on {} failed: {}", currency, date, err);
            unavailable()
        })?;
        log::debug!("{} rates received for {}", entries.len(), date);
        find_rate(&entries, currency).ok_or_else(unavailable)
    }
}

/// Rate of the first entry whose `cc` is `currency`, if that rate is a non-zero number.
///
/// Entries of the National Bank of Ukraine daily exchange table look like
/// `{"r030":36,"txt":"...","rate":17.18555,"cc":"AUD","exchangedate":"28.10.2019"}`.
fn find_rate(entries: &[Value], currency: &CurrencyCode) -> Option<Decimal> {
    let entry = entries
        .iter()
        .find(|e| e.get("cc").and_then(Value::as_str) == Some(currency.as_str()))?;
    let rate = entry.get("rate").filter(|r| r.is_number())?;
    // shortest decimal representation of the float, so 17.18555 stays 17.18555
    let rate = parse_lenient(&rate.to_string());
    if rate.is_zero() {
        None
    } else {
        Some(rate)
    }
}

/// A single rate supplied by the user, applied to any date and currency.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub Decimal);

impl RateSource for FixedRate {
    fn rate(&self, date: NaiveDate, currency: &CurrencyCode) -> Result<Decimal, LedgerError> {
        if self.0.is_zero() {
            return Err(LedgerError::RateUnavailable {
                currency: currency.to_string(),
                date,
            });
        }
        Ok(self.0)
    }
}
