use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("date should be YYYY-MM-DD, got '{0}'")]
    InvalidDate(String),
    #[error("currency should be three uppercase letters (XYZ), got '{0}'")]
    InvalidCurrency(String),
    #[error("amount and tax must be non-zero numbers")]
    InvalidAmount,
    #[error("amount too large to convert or total")]
    Overflow,
    #[error("no {currency} rate for date {}", .date.format("%Y%m%d"))]
    RateUnavailable { currency: String, date: NaiveDate },
    #[error("found no income with id #{0}")]
    RecordNotFound(i64),
    #[error("invalid value stored in column '{column}': {value}")]
    InvalidStoredValue { column: &'static str, value: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
