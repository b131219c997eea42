use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

/// A holding enriched with values derived from its prices and the collection it belongs to.
///
/// Views are computed on every read and never stored.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct HoldingView {
    id: i64,
    name: String,
    quantity: Decimal,
    purchase_price: Decimal,
    current_price: Decimal,
    current_value: Decimal,
    invested_value: Decimal,
    roi: Decimal,
    portfolio_share: Decimal,
}
