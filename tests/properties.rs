//! Property-based tests for the valuation and aggregation invariants.

use portfolio_tracker::{
    app::calc::{
        current_value, enrich_all, invested_value, roi, round_money, summarize, top_by_roi,
    },
    models::Holding,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Positive amount with two decimal places, between 0.01 and 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|units| Decimal::new(units, 2))
}

/// Positive amount with eight decimal places, below 92,233,720,368.54775807.
fn wide_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=i64::MAX).prop_map(|units| Decimal::new(units, 8))
}

/// `a * b` rounded half up to four places, computed on the integer mantissas.
fn exact_product(a: Decimal, b: Decimal) -> Decimal {
    let product = a.mantissa() * b.mantissa();
    let divisor = 10i128.pow(a.scale() + b.scale() - 4);
    let mut quotient = product / divisor;
    if (product % divisor) * 2 >= divisor {
        quotient += 1;
    }
    Decimal::from_i128_with_scale(quotient, 4)
}

fn holdings(max: usize) -> impl Strategy<Value = Vec<Holding>> {
    prop::collection::vec((amount(), amount(), amount()), 0..max).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (quantity, purchase, current))| {
                Holding::new(i as i64 + 1, format!("H{}", i), quantity, purchase, current)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn roi_follows_the_formula(q in amount(), p in amount(), c in amount()) {
        let expected = round_money((q * c - q * p) / (q * p) * dec!(100));
        prop_assert_eq!(roi(q, p, c), expected);
    }

    #[test]
    fn roi_without_purchase_price_is_zero(q in amount(), c in amount()) {
        prop_assert_eq!(roi(q, Decimal::ZERO, c), Decimal::ZERO);
    }

    #[test]
    fn eight_place_products_are_exact(q in wide_amount(), p in wide_amount()) {
        prop_assert_eq!(current_value(q, p), exact_product(q, p));
        prop_assert_eq!(invested_value(q, p), exact_product(q, p));
    }

    #[test]
    fn values_are_linear_in_quantity(q in amount(), p in amount(), c in amount()) {
        // Two-place inputs give four-place products, so rounding is exact.
        prop_assert_eq!(current_value(q * dec!(2), c), current_value(q, c) * dec!(2));
        prop_assert_eq!(invested_value(q * dec!(2), p), invested_value(q, p) * dec!(2));
    }

    #[test]
    fn totals_match_the_enriched_holdings(holdings in holdings(20)) {
        let summary = summarize(&holdings);
        let views = enrich_all(&holdings);

        let current: Decimal = views.iter().map(|v| *v.current_value()).sum();
        let invested: Decimal = views.iter().map(|v| *v.invested_value()).sum();

        prop_assert!((*summary.total_current_value() - current).abs() <= dec!(0.0001));
        prop_assert!((*summary.total_invested_value() - invested).abs() <= dec!(0.0001));
        prop_assert_eq!(
            *summary.total_profit(),
            *summary.total_current_value() - *summary.total_invested_value()
        );
    }

    #[test]
    fn shares_sum_to_hundred(holdings in holdings(20)) {
        let views = enrich_all(&holdings);
        let total: Decimal = views.iter().map(|v| *v.portfolio_share()).sum();

        if holdings.is_empty() {
            prop_assert_eq!(total, Decimal::ZERO);
        } else {
            let tolerance = dec!(0.00005) * Decimal::from(holdings.len());
            prop_assert!((total - dec!(100)).abs() <= tolerance);
        }
    }

    #[test]
    fn top_performer_beats_every_earlier_and_later_holding(holdings in holdings(20)) {
        match top_by_roi(&holdings) {
            Err(_) => prop_assert!(holdings.is_empty()),
            Ok(top) => {
                let rois: Vec<Decimal> = enrich_all(&holdings).iter().map(|v| *v.roi()).collect();
                let position = holdings.iter().position(|h| h.id() == top.id()).unwrap();

                prop_assert!(rois.iter().all(|r| *r <= *top.roi()));
                prop_assert!(rois[..position].iter().all(|r| *r < *top.roi()));
            }
        }
    }

    #[test]
    fn largest_asset_has_the_highest_value(holdings in holdings(20)) {
        let summary = summarize(&holdings);
        let views = enrich_all(&holdings);

        match summary.largest_asset_name() {
            None => prop_assert!(holdings.is_empty()),
            Some(name) => {
                let largest = views.iter().find(|v| v.name() == name).unwrap();
                prop_assert!(views.iter().all(|v| v.current_value() <= largest.current_value()));
            }
        }
    }
}
