//! Per-invocation application context: settings plus the open ledger

use crate::config::Settings;
use crate::core::{build_record, CurrencyCode, Income, LedgerError, RateSource};
use crate::store::{LedgerStore, SqliteStore};
use chrono::Datelike;

pub struct Context<S = SqliteStore> {
    pub settings: Settings,
    store: S,
}

impl Context<SqliteStore> {
    /// Open the ledger named in `settings`.
    pub fn open(settings: Settings) -> Result<Self, LedgerError> {
        let store = SqliteStore::open(&settings.database)?;
        Ok(Context::new(settings, store))
    }
}

impl<S: LedgerStore> Context<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        Context { settings, store }
    }

    pub fn local_currency(&self) -> &CurrencyCode {
        &self.settings.local_currency
    }

    /// Validate, convert and store a new income. Nothing is written unless every check
    /// and the rate lookup succeed.
    pub fn add_income<R: RateSource + ?Sized>(
        &mut self,
        date: &str,
        currency: &str,
        amount: &str,
        tax: &str,
        rates: &R,
    ) -> Result<Income, LedgerError> {
        let mut income = build_record(date, currency, amount, tax, self.local_currency(), rates)?;
        income.id = self.store.create(&income)?;
        log::info!(
            "Added #{}: {} {} {} at {}",
            income.id,
            income.date,
            income.amount,
            income.currency,
            income.rate
        );
        Ok(income)
    }

    /// Remove an income by id, returning what was removed.
    pub fn remove_income(&mut self, id: i64) -> Result<Income, LedgerError> {
        let income = self.store.get(id)?.ok_or(LedgerError::RecordNotFound(id))?;
        self.store.delete(income.id)?;
        log::info!("Removed #{}", income.id);
        Ok(income)
    }

    /// Stored incomes, newest first, optionally limited to one calendar year.
    pub fn incomes(&self, year: Option<i32>) -> Result<Vec<Income>, LedgerError> {
        let mut incomes = self.store.list_all()?;
        if let Some(year) = year {
            incomes.retain(|income| income.date.year() == year);
        }
        Ok(incomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedRate;
    use rust_decimal_macros::dec;

    fn context() -> Context {
        Context::new(Settings::default(), SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn add_assigns_id_and_persists() {
        let mut ctx = context();
        let income = ctx
            .add_income("2019-10-28", "AUD", "1000", "0.05", &FixedRate(dec!(17.18555)))
            .unwrap();
        assert_eq!(income.id, 1);

        let stored = ctx.incomes(None).unwrap();
        assert_eq!(stored, vec![income]);
    }

    #[test]
    fn failed_add_writes_nothing() {
        let mut ctx = context();
        let rates = FixedRate(rust_decimal::Decimal::ZERO);
        assert!(ctx.add_income("2019-10-28", "AUD", "1000", "0.05", &rates).is_err());
        assert!(ctx.add_income("2019-10-28", "usd", "1000", "0.05", &rates).is_err());
        assert!(ctx.add_income("2019-10-32", "UAH", "1000", "0.05", &rates).is_err());
        assert!(ctx.add_income("2019-10-28", "UAH", "0", "0.05", &rates).is_err());
        assert!(ctx.incomes(None).unwrap().is_empty());
    }

    #[test]
    fn oversized_amount_is_never_stored() {
        let mut ctx = context();
        let err = ctx
            .add_income(
                "2020-01-01",
                "USD",
                "50000000000000000000000000000",
                "0.05",
                &FixedRate(dec!(2)),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));
        assert!(ctx.incomes(None).unwrap().is_empty());
    }

    #[test]
    fn remove_returns_removed_income() {
        let mut ctx = context();
        let added = ctx
            .add_income("2020-01-15", "UAH", "500", "0.05", &FixedRate(dec!(1)))
            .unwrap();
        let removed = ctx.remove_income(added.id).unwrap();
        assert_eq!(removed, added);
        assert!(ctx.incomes(None).unwrap().is_empty());
    }

    #[test]
    fn remove_unknown_id_leaves_store_unchanged() {
        let mut ctx = context();
        ctx.add_income("2020-01-15", "UAH", "500", "0.05", &FixedRate(dec!(1)))
            .unwrap();
        let before = ctx.incomes(None).unwrap();

        let err = ctx.remove_income(42).unwrap_err();
        assert!(matches!(err, LedgerError::RecordNotFound(42)));
        assert_eq!(ctx.incomes(None).unwrap(), before);
    }

    #[test]
    fn incomes_filtered_by_year() {
        let mut ctx = context();
        let rates = FixedRate(dec!(1));
        for date in ["2019-12-31", "2020-01-01", "2020-06-30", "2021-01-01"] {
            ctx.add_income(date, "UAH", "10", "0.05", &rates).unwrap();
        }
        let dates: Vec<_> = ctx
            .incomes(Some(2020))
            .unwrap()
            .into_iter()
            .map(|i| i.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2020-06-30", "2020-01-01"]);
    }
}
