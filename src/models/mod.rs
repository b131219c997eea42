pub mod holding;
pub mod holding_view;
pub mod portfolio_summary;

pub use holding::{Holding, NewHolding};
pub use holding_view::HoldingView;
pub use portfolio_summary::PortfolioSummary;
