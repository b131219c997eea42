use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::app::calc::ROUNDING;

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal> {
    field
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}'", field_name, field))
}

/// Two decimal places, for display only.
pub fn format_amount(value: &Decimal) -> String {
    format!("{:.2}", value.round_dp_with_strategy(2, ROUNDING))
}

pub fn format_percent(value: &Decimal) -> String {
    format!("{}%", format_amount(value))
}

pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
