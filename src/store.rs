//! SQLite backed income storage

use crate::core::{CurrencyCode, Income, LedgerError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS income (
    id INTEGER PRIMARY KEY,
    date TEXT NOT NULL,       -- YYYY-MM-DD
    currency TEXT NOT NULL,
    amount TEXT NOT NULL,     -- decimals kept as text, exact round trip
    tax TEXT NOT NULL,
    rate TEXT NOT NULL
);
"#;

const SELECT: &str = "SELECT id, date, currency, amount, tax, rate FROM income";

/// Create, delete and read back stored incomes. Records are never updated in place.
pub trait LedgerStore {
    /// Persist a new income, returning its assigned id
    fn create(&mut self, income: &Income) -> Result<i64, LedgerError>;
    fn delete(&mut self, id: i64) -> Result<(), LedgerError>;
    fn get(&self, id: i64) -> Result<Option<Income>, LedgerError>;
    /// Every income, newest date first
    fn list_all(&self) -> Result<Vec<Income>, LedgerError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        log::debug!("Opening ledger {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, LedgerError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, LedgerError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn })
    }
}

impl LedgerStore for SqliteStore {
    fn create(&mut self, income: &Income) -> Result<i64, LedgerError> {
        self.conn.execute(
            "INSERT INTO income (date, currency, amount, tax, rate) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                income.date,
                income.currency,
                income.amount.to_string(),
                income.tax.to_string(),
                income.rate.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Inserted income #{}", id);
        Ok(id)
    }

    fn delete(&mut self, id: i64) -> Result<(), LedgerError> {
        let deleted = self
            .conn
            .execute("DELETE FROM income WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(LedgerError::RecordNotFound(id));
        }
        Ok(())
    }

    fn get(&self, id: i64) -> Result<Option<Income>, LedgerError> {
        let raw = self
            .conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), params![id], RawIncome::from_row)
            .optional()?;
        raw.map(RawIncome::into_income).transpose()
    }

    fn list_all(&self) -> Result<Vec<Income>, LedgerError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT} ORDER BY date DESC, id DESC"))?;
        let rows = stmt.query_map([], RawIncome::from_row)?;
        let incomes = rows
            .map(|row| row?.into_income())
            .collect::<Result<Vec<_>, LedgerError>>()?;
        Ok(incomes)
    }
}

/// Row as read from SQLite, before the decimal columns are parsed
struct RawIncome {
    id: i64,
    date: NaiveDate,
    currency: CurrencyCode,
    amount: String,
    tax: String,
    rate: String,
}

impl RawIncome {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawIncome {
            id: row.get(0)?,
            date: row.get(1)?,
            currency: row.get(2)?,
            amount: row.get(3)?,
            tax: row.get(4)?,
            rate: row.get(5)?,
        })
    }

    fn into_income(self) -> Result<Income, LedgerError> {
        Ok(Income {
            id: self.id,
            date: self.date,
            currency: self.currency,
            amount: parse_column("amount", self.amount)?,
            tax: parse_column("tax", self.tax)?,
            rate: parse_column("rate", self.rate)?,
        })
    }
}

fn parse_column(column: &'static str, value: String) -> Result<Decimal, LedgerError> {
    value
        .parse()
        .map_err(|_| LedgerError::InvalidStoredValue { column, value })
}
