pub mod currency;
pub mod error;
pub mod income;
pub mod money;
pub mod period;
pub mod rate;
pub mod report;

// Flat public surface for domain types and functions.
pub use currency::CurrencyCode;
pub use error::LedgerError;
pub use income::{build_record, Income, DATE_FORMAT};
pub use period::aggregate;
pub use rate::{resolve_rate, FixedRate, NbuRates, RateSource};
pub use report::{format_periods, format_records, PeriodRow, RecordRow};
