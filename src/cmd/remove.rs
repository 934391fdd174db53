//! Remove command - delete an income by id

use crate::config::Settings;
use crate::context::Context;
use clap::Args;

#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Id of the income, as shown by `print`
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    id: i64,
}

impl RemoveCommand {
    pub fn exec(&self, settings: Settings) -> anyhow::Result<()> {
        let mut ctx = Context::open(settings)?;
        let income = ctx.remove_income(self.id)?;
        println!(
            "removed #{}: {} {} {} {} {}",
            income.id, income.date, income.currency, income.amount, income.tax, income.rate
        );
        Ok(())
    }
}
