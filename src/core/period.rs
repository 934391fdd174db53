use super::error::LedgerError;
use super::income::Income;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// Reporting period an income falls into.
///
/// Labels: month `2019-10`, quarter `2019 Q4`, year `2019`. The label shapes never
/// collide, so a single map can hold all three granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year(i32),
}

impl Period {
    pub fn month(date: NaiveDate) -> Self {
        Period::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Jan-Mar Q1, Apr-Jun Q2, Jul-Sep Q3, Oct-Dec Q4
    pub fn quarter(date: NaiveDate) -> Self {
        Period::Quarter {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }

    pub fn year(date: NaiveDate) -> Self {
        Period::Year(date.year())
    }

    /// The three periods every date contributes to.
    pub fn all_for(date: NaiveDate) -> [Period; 3] {
        [Period::month(date), Period::quarter(date), Period::year(date)]
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Period::Quarter { year, quarter } => write!(f, "{:04} Q{}", year, quarter),
            Period::Year(year) => write!(f, "{:04}", year),
        }
    }
}

/// Running totals for one period, kept at full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    /// Sum of per-income values, each already rounded up to cents
    pub sum: Decimal,
    pub tax_sum: Decimal,
}

impl PeriodTotals {
    /// Totals are left untouched when either sum would overflow.
    pub fn add(&mut self, value: Decimal, tax: Decimal) -> Result<(), LedgerError> {
        let sum = self.sum.checked_add(value).ok_or(LedgerError::Overflow)?;
        let tax_sum = self.tax_sum.checked_add(tax).ok_or(LedgerError::Overflow)?;
        self.sum = sum;
        self.tax_sum = tax_sum;
        Ok(())
    }
}

/// Totals keyed by period. A period is present only if at least one income maps to it.
pub type PeriodMap = HashMap<Period, PeriodTotals>;

/// Accumulate every income into its month, quarter and year.
pub fn aggregate<'a, I>(incomes: I) -> Result<PeriodMap, LedgerError>
where
    I: IntoIterator<Item = &'a Income>,
{
    let mut periods = PeriodMap::new();
    for income in incomes {
        let value = income.value()?;
        let tax = income.tax_due()?;
        for period in Period::all_for(income.date) {
            periods.entry(period).or_default().add(value, tax)?;
            log::debug!("#{} adds value={}, tax={} to {}", income.id, value, tax, period);
        }
    }
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn income(id: i64, d: &str, amount: Decimal, tax: Decimal, rate: Decimal) -> Income {
        Income {
            id,
            date: date(d),
            currency: "AUD".parse().unwrap(),
            amount,
            tax,
            rate,
        }
    }

    #[test]
    fn labels() {
        let d = date("2019-10-28");
        assert_eq!(Period::month(d).label(), "2019-10");
        assert_eq!(Period::quarter(d).label(), "2019 Q4");
        assert_eq!(Period::year(d).label(), "2019");
        assert_eq!(Period::month(date("2021-03-01")).label(), "2021-03");
    }

    #[test]
    fn quarter_mapping_for_every_month() {
        for year in [2018, 2019, 2024] {
            for month in 1..=12u32 {
                let d = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
                let expected = match month {
                    1..=3 => 1,
                    4..=6 => 2,
                    7..=9 => 3,
                    _ => 4,
                };
                assert_eq!(
                    Period::quarter(d),
                    Period::Quarter {
                        year,
                        quarter: expected
                    }
                );
                assert_eq!(Period::quarter(d).label(), format!("{year} Q{expected}"));
            }
        }
    }

    #[test]
    fn month_label_starts_with_year_label() {
        for d in ["2019-01-01", "2019-12-31", "2020-02-29", "2023-07-04"] {
            let d = date(d);
            assert_eq!(&Period::month(d).label()[..4], Period::year(d).label());
        }
    }

    #[test]
    fn single_income_fills_three_periods() {
        let incomes = vec![income(1, "2019-10-28", dec!(1000), dec!(0.05), dec!(17.18555))];
        let periods = aggregate(&incomes).unwrap();

        assert_eq!(periods.len(), 3);
        for label in ["2019-10", "2019 Q4", "2019"] {
            let totals = periods
                .iter()
                .find(|(p, _)| p.label() == label)
                .map(|(_, t)| *t)
                .unwrap();
            assert_eq!(totals.sum, dec!(17185.55));
            assert_eq!(totals.tax_sum, dec!(859.2775));
        }
    }

    #[test]
    fn month_sum_adds_individually_rounded_values() {
        // 1.001 and 1.001 round to 1.01 each: 2.02, not round_up(2.002) = 2.01
        let incomes = vec![
            income(1, "2020-05-01", dec!(1.001), dec!(0.05), dec!(1)),
            income(2, "2020-05-20", dec!(1.001), dec!(0.05), dec!(1)),
        ];
        let periods = aggregate(&incomes).unwrap();
        let may = periods[&Period::Month { year: 2020, month: 5 }];
        assert_eq!(may.sum, dec!(2.02));
        assert_eq!(may.tax_sum, dec!(0.101));
    }

    #[test]
    fn accumulation_is_order_independent() {
        let mut incomes = vec![
            income(1, "2020-01-10", dec!(100), dec!(0.05), dec!(27.5)),
            income(2, "2020-02-10", dec!(33.33), dec!(0.05), dec!(28.1234)),
            income(3, "2020-07-01", dec!(12.5), dec!(0.18), dec!(27.9)),
            income(4, "2021-01-01", dec!(5), dec!(0.05), dec!(1)),
        ];
        let forward = aggregate(&incomes).unwrap();
        incomes.reverse();
        let backward = aggregate(&incomes).unwrap();
        assert_eq!(forward, backward);

        let year_2020 = forward[&Period::Year(2020)];
        let expected: Decimal = incomes
            .iter()
            .filter(|i| i.date.year() == 2020)
            .map(|i| i.value().unwrap())
            .sum();
        assert_eq!(year_2020.sum, expected);
        assert_eq!(forward[&Period::Quarter { year: 2020, quarter: 1 }].sum, dec!(2750) + dec!(937.36));
    }

    #[test]
    fn periods_separate_by_year() {
        let incomes = vec![
            income(1, "2019-12-31", dec!(10), dec!(0.05), dec!(1)),
            income(2, "2020-01-01", dec!(20), dec!(0.05), dec!(1)),
        ];
        let periods = aggregate(&incomes).unwrap();
        assert_eq!(periods.len(), 6);
        assert_eq!(periods[&Period::Year(2019)].sum, dec!(10));
        assert_eq!(periods[&Period::Year(2020)].sum, dec!(20));
    }

    #[test]
    fn no_incomes_no_periods() {
        assert!(aggregate(&Vec::<Income>::new()).unwrap().is_empty());
    }

    #[test]
    fn overflowing_totals_are_an_error() {
        let incomes = vec![
            income(1, "2020-05-01", dec!(50000000000000000000000000000), dec!(0.05), dec!(1)),
            income(2, "2020-05-02", dec!(50000000000000000000000000000), dec!(0.05), dec!(1)),
        ];
        let err = aggregate(&incomes).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow));
    }

    #[test]
    fn failed_add_keeps_totals() {
        let mut totals = PeriodTotals::default();
        totals.add(dec!(10), dec!(0.5)).unwrap();
        assert!(totals.add(Decimal::MAX, dec!(1)).is_err());
        assert_eq!(totals.sum, dec!(10));
        assert_eq!(totals.tax_sum, dec!(0.5));
    }
}
