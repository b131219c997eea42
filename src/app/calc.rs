//! Holding valuation and portfolio aggregation.
//!
//! Every function here is pure. Products, quotients and sums are carried exactly in a
//! [`BigDecimal`] and rounded once, half away from zero, to [`SCALE`] places at the output.
//! A product of two validated amounts has up to 38 significant digits, more than [`Decimal`]
//! holds, so no intermediate is ever computed in [`Decimal`].

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    error::{PortfolioError, PortfolioResult},
    models::{Holding, HoldingView, PortfolioSummary},
};

pub const SCALE: u32 = 4;
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Rounds to [`SCALE`] places and pads the result so it always carries exactly that many.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, ROUNDING);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(SCALE);
    rounded
}

fn widen(value: Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(value.mantissa()), i64::from(value.scale()))
}

fn hundred() -> BigDecimal {
    BigDecimal::from(100)
}

/// Rounds an exact intermediate to [`SCALE`] places and narrows it back to a [`Decimal`].
///
/// # Panics
///
/// If the rounded result is outside the range of [`Decimal`], as its own arithmetic would.
fn round_wide(value: BigDecimal) -> Decimal {
    let (mantissa, scale) = value
        .with_scale_round(i64::from(SCALE), RoundingMode::HalfUp)
        .into_bigint_and_exponent();

    match mantissa
        .to_i128()
        .map(|m| Decimal::try_from_i128_with_scale(m, scale as u32))
    {
        Some(Ok(rounded)) => rounded,
        _ => panic!("{}e-{} is outside the range of Decimal", mantissa, scale),
    }
}

fn sum_wide(values: impl Iterator<Item = Decimal>) -> BigDecimal {
    values.fold(BigDecimal::from(0), |acc, value| acc + widen(value))
}

pub fn current_value(quantity: Decimal, current_price: Decimal) -> Decimal {
    round_wide(widen(quantity) * widen(current_price))
}

pub fn invested_value(quantity: Decimal, purchase_price: Decimal) -> Decimal {
    round_wide(widen(quantity) * widen(purchase_price))
}

/// Return on investment in percent. Zero when nothing was invested.
pub fn roi(quantity: Decimal, purchase_price: Decimal, current_price: Decimal) -> Decimal {
    let invested = invested_value(quantity, purchase_price);
    if invested.is_zero() {
        return round_money(Decimal::ZERO);
    }
    let current = current_value(quantity, current_price);
    round_wide((widen(current) - widen(invested)) / widen(invested) * hundred())
}

/// A value's share of `total` in percent. Zero when `total` is zero.
pub fn portfolio_share(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return round_money(Decimal::ZERO);
    }
    round_wide(widen(value) / widen(total) * hundred())
}

pub fn holding_current_value(holding: &Holding) -> Decimal {
    current_value(*holding.quantity(), *holding.current_price())
}

pub fn holding_invested_value(holding: &Holding) -> Decimal {
    invested_value(*holding.quantity(), *holding.purchase_price())
}

pub fn holding_roi(holding: &Holding) -> Decimal {
    roi(
        *holding.quantity(),
        *holding.purchase_price(),
        *holding.current_price(),
    )
}

pub fn total_current_value(holdings: &[Holding]) -> Decimal {
    round_wide(sum_wide(holdings.iter().map(holding_current_value)))
}

pub fn total_invested_value(holdings: &[Holding]) -> Decimal {
    round_wide(sum_wide(holdings.iter().map(holding_invested_value)))
}

pub fn enrich(holding: &Holding, total_current_value: Decimal) -> HoldingView {
    let current = holding_current_value(holding);

    HoldingView::new(
        *holding.id(),
        holding.name().to_string(),
        *holding.quantity(),
        *holding.purchase_price(),
        *holding.current_price(),
        current,
        holding_invested_value(holding),
        holding_roi(holding),
        portfolio_share(current, total_current_value),
    )
}

pub fn enrich_all(holdings: &[Holding]) -> Vec<HoldingView> {
    let total = total_current_value(holdings);
    holdings.iter().map(|h| enrich(h, total)).collect()
}

pub fn summarize(holdings: &[Holding]) -> PortfolioSummary {
    if holdings.is_empty() {
        let zero = round_money(Decimal::ZERO);
        return PortfolioSummary::new(zero, zero, zero, zero, None);
    }

    let total_current = total_current_value(holdings);
    let total_invested = total_invested_value(holdings);
    let total_profit = round_wide(widen(total_current) - widen(total_invested));

    let roi_sum = sum_wide(holdings.iter().map(holding_roi));
    let average_roi = round_wide(roi_sum / BigDecimal::from(holdings.len() as u64));

    let largest_asset_name =
        first_max_by_key(holdings, holding_current_value).map(|h| h.name().to_string());

    PortfolioSummary::new(
        total_invested,
        total_current,
        total_profit,
        average_roi,
        largest_asset_name,
    )
}

/// The holding with the highest ROI, enriched against the whole collection.
pub fn top_by_roi(holdings: &[Holding]) -> PortfolioResult<HoldingView> {
    let top = first_max_by_key(holdings, holding_roi).ok_or(PortfolioError::EmptyPortfolio)?;
    Ok(enrich(top, total_current_value(holdings)))
}

// `Iterator::max_by_key` keeps the last of equal elements; ties here go to the first.
fn first_max_by_key<F>(holdings: &[Holding], key: F) -> Option<&Holding>
where
    F: Fn(&Holding) -> Decimal,
{
    let mut best: Option<(&Holding, Decimal)> = None;

    for holding in holdings {
        let value = key(holding);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((holding, value)),
        }
    }

    best.map(|(holding, _)| holding)
}
