pub mod add;
pub mod export;
pub mod print;
pub mod rate;
pub mod remove;

use crate::config::Settings;
use crate::core::{FixedRate, NbuRates, RateSource};
use rust_decimal::Decimal;

/// A user supplied rate when given, otherwise the configured rate API.
fn rate_source(settings: &Settings, fixed: Option<Decimal>) -> anyhow::Result<Box<dyn RateSource>> {
    Ok(match fixed {
        Some(rate) => Box::new(FixedRate(rate)),
        None => Box::new(NbuRates::new(settings.rate_api.clone())?),
    })
}
