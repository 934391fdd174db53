//! Print command - incomes by id, then totals per month, quarter and year

use crate::config::Settings;
use crate::context::Context;
use crate::core::{aggregate, format_periods, format_records, PeriodRow, RecordRow};
use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct PrintCommand {
    /// Only incomes dated in this calendar year
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PrintData {
    local_currency: String,
    records: Vec<RecordRow>,
    periods: Vec<PeriodRow>,
}

#[derive(Debug, Tabled)]
struct RecordTableRow {
    #[tabled(rename = "#")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&RecordRow> for RecordTableRow {
    fn from(row: &RecordRow) -> Self {
        RecordTableRow {
            id: format!("#{}", row.id),
            date: row.date.to_string(),
            currency: row.currency.clone(),
            amount: row.amount.to_string(),
            tax: row.tax.to_string(),
            rate: row.rate.to_string(),
            value: format!("{:.2}", row.value),
        }
    }
}

#[derive(Debug, Tabled)]
struct PeriodTableRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Sum")]
    sum: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl From<&PeriodRow> for PeriodTableRow {
    fn from(row: &PeriodRow) -> Self {
        PeriodTableRow {
            period: row.period.clone(),
            sum: format!("{:.2}", row.sum),
            tax: format!("{:.2}", row.tax),
        }
    }
}

impl PrintCommand {
    pub fn exec(&self, settings: Settings) -> anyhow::Result<()> {
        let ctx = Context::open(settings)?;
        let incomes = ctx.incomes(self.year)?;
        let data = PrintData {
            local_currency: ctx.local_currency().to_string(),
            records: format_records(&incomes)?,
            periods: format_periods(&aggregate(&incomes)?),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            print_tables(&data);
        }
        Ok(())
    }
}

fn print_tables(data: &PrintData) {
    if data.records.is_empty() {
        println!("No incomes recorded");
        return;
    }

    let records: Vec<RecordTableRow> = data.records.iter().map(Into::into).collect();
    println!("INCOME");
    println!("{}", render(&records, 3..));
    println!();

    let periods: Vec<PeriodTableRow> = data.periods.iter().map(Into::into).collect();
    println!("TOTALS ({})", data.local_currency);
    println!("{}", render(&periods, 1..));
}

/// Rounded table with the given (numeric) columns right aligned
fn render<T: Tabled>(rows: &[T], numeric: std::ops::RangeFrom<usize>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(numeric)).with(Alignment::right()))
        .to_string()
}
