use super::currency::CurrencyCode;
use super::error::LedgerError;
use super::money::{parse_lenient, round_up};
use super::rate::{resolve_rate, RateSource};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single income event, converted at the rate of its date.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    /// Assigned by the store, `0` until persisted
    pub id: i64,
    pub date: NaiveDate,
    pub currency: CurrencyCode,
    /// Gross income in `currency`
    pub amount: Decimal,
    /// Tax fraction applied to the converted value
    pub tax: Decimal,
    /// `currency` to local currency at `date`
    pub rate: Decimal,
}

impl Income {
    /// Converted value in local currency, rounded up to whole cents.
    pub fn value(&self) -> Result<Decimal, LedgerError> {
        self.amount
            .checked_mul(self.rate)
            .map(round_up)
            .ok_or(LedgerError::Overflow)
    }

    /// Tax owed on the converted value, unrounded.
    pub fn tax_due(&self) -> Result<Decimal, LedgerError> {
        self.value()?
            .checked_mul(self.tax)
            .ok_or(LedgerError::Overflow)
    }
}

/// Validate raw user input and resolve the rate, producing a record ready to be stored.
///
/// Checks run in order (date, currency, amount/tax) and all of them happen before the
/// rate source is consulted. Only exact zero is rejected for amount and tax, as is an
/// amount whose converted value or tax does not fit a `Decimal`.
pub fn build_record<S: RateSource + ?Sized>(
    raw_date: &str,
    raw_currency: &str,
    raw_amount: &str,
    raw_tax: &str,
    local_currency: &CurrencyCode,
    rates: &S,
) -> Result<Income, LedgerError> {
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(raw_date.to_string()))?;
    let currency: CurrencyCode = raw_currency.parse()?;

    let amount = parse_lenient(raw_amount);
    let tax = parse_lenient(raw_tax);
    if amount.is_zero() || tax.is_zero() {
        return Err(LedgerError::InvalidAmount);
    }

    let rate = resolve_rate(rates, date, &currency, local_currency)?;

    let income = Income {
        id: 0,
        date,
        currency,
        amount,
        tax,
        rate,
    };
    income.tax_due().map_err(|_| LedgerError::InvalidAmount)?;
    Ok(income)
}
