use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    total_invested_value: Decimal,
    total_current_value: Decimal,
    total_profit: Decimal,
    /// Unweighted mean of the per-holding ROI.
    #[serde(rename = "averageROI")]
    average_roi: Decimal,
    largest_asset_name: Option<String>,
}
