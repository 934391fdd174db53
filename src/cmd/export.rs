//! Export command - every stored income as CSV

use crate::config::Settings;
use crate::context::Context;
use crate::core::format_records;
use clap::Args;
use std::io;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Only incomes dated in this calendar year
    #[arg(short, long)]
    year: Option<i32>,
}

impl ExportCommand {
    pub fn exec(&self, settings: Settings) -> anyhow::Result<()> {
        let ctx = Context::open(settings)?;
        let incomes = ctx.incomes(self.year)?;
        log::info!("Exporting {} incomes", incomes.len());
        write_csv(format_records(&incomes)?, io::stdout())
    }
}

fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Income;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn writes_header_and_rows_by_id() {
        let incomes = vec![
            Income {
                id: 2,
                date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
                currency: "UAH".parse().unwrap(),
                amount: dec!(500),
                tax: dec!(0.05),
                rate: dec!(1),
            },
            Income {
                id: 1,
                date: NaiveDate::from_ymd_opt(2019, 10, 28).unwrap(),
                currency: "AUD".parse().unwrap(),
                amount: dec!(1000),
                tax: dec!(0.05),
                rate: dec!(17.18555),
            },
        ];
        let mut out = Vec::new();
        write_csv(format_records(&incomes).unwrap(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "id,date,currency,amount,tax,rate,value");
        assert_eq!(lines[1], "1,2019-10-28,AUD,1000,0.05,17.18555,17185.55");
        assert_eq!(lines[2], "2,2020-03-01,UAH,500,0.05,1,500");
        assert_eq!(lines.len(), 3);
    }
}
