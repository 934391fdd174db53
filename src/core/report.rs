use super::error::LedgerError;
use super::income::Income;
use super::money::round_up;
use super::period::{Period, PeriodMap};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One stored income, as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub date: NaiveDate,
    pub currency: String,
    pub amount: Decimal,
    pub tax: Decimal,
    pub rate: Decimal,
    pub value: Decimal,
}

/// Totals for one period, as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    pub period: String,
    pub sum: Decimal,
    /// Rounded up to whole cents
    pub tax: Decimal,
}

/// Rows ordered by ascending id, whatever order the store returned them in.
pub fn format_records(incomes: &[Income]) -> Result<Vec<RecordRow>, LedgerError> {
    let mut sorted: Vec<&Income> = incomes.iter().collect();
    sorted.sort_by_key(|income| income.id);
    sorted
        .into_iter()
        .map(|income| {
            Ok(RecordRow {
                id: income.id,
                date: income.date,
                currency: income.currency.to_string(),
                amount: income.amount,
                tax: income.tax,
                rate: income.rate,
                value: income.value()?,
            })
        })
        .collect()
}

/// Rows ordered by plain string comparison of the period labels, so for one year
/// `2019` < `2019 Q1` < `2019-01`.
pub fn format_periods(periods: &PeriodMap) -> Vec<PeriodRow> {
    let mut rows: Vec<(String, &Period)> = periods.keys().map(|p| (p.label(), p)).collect();
    rows.sort_by(|(a, _), (b, _)| a.cmp(b));
    rows.into_iter()
        .map(|(label, period)| {
            let totals = &periods[period];
            PeriodRow {
                period: label,
                sum: totals.sum,
                tax: round_up(totals.tax_sum),
            }
        })
        .collect()
}
