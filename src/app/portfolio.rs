use anyhow::{Context, Error, Result};
use csv::Reader;
use derive_getters::Getters;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    app::{calc, utils::parse_decimal},
    db::HoldingStore,
    error::{PortfolioError, PortfolioResult},
    models::{HoldingView, NewHolding, PortfolioSummary},
};

/// Holdings, summary and top performer computed from one read of the store.
#[derive(Clone, Debug, Getters)]
pub struct PortfolioSnapshot {
    holdings: Vec<HoldingView>,
    summary: PortfolioSummary,
    top: Option<HoldingView>,
}

#[derive(Clone, Copy, Debug, Default, Eq, Getters, PartialEq)]
pub struct ImportReport {
    imported: usize,
    skipped: usize,
}

#[derive(Debug)]
pub struct Portfolio<S> {
    store: S,
}

impl<S: HoldingStore> Portfolio<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates and stores a holding.
    ///
    /// The returned view reports a portfolio share of zero; shares are only meaningful when
    /// computed against the whole collection, as [`Portfolio::holdings`] does.
    pub async fn add_holding(&self, candidate: NewHolding) -> PortfolioResult<HoldingView> {
        let candidate = candidate.validate()?;
        let holding = self.store.create(candidate).await?;

        info!(id = holding.id(), name = %holding.name(), "holding added");

        Ok(calc::enrich(&holding, Decimal::ZERO))
    }

    pub async fn holdings(&self) -> PortfolioResult<Vec<HoldingView>> {
        let holdings = self.store.list_all().await?;
        Ok(calc::enrich_all(&holdings))
    }

    pub async fn delete_holding(&self, id: i64) -> PortfolioResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(PortfolioError::HoldingNotFound(id));
        }
        self.store.delete_by_id(id).await?;

        info!(id, "holding deleted");

        Ok(())
    }

    pub async fn summary(&self) -> PortfolioResult<PortfolioSummary> {
        let holdings = self.store.list_all().await?;
        debug!(count = holdings.len(), "summarizing portfolio");
        Ok(calc::summarize(&holdings))
    }

    pub async fn top_holding(&self) -> PortfolioResult<HoldingView> {
        let holdings = self.store.list_all().await?;
        calc::top_by_roi(&holdings)
    }

    pub async fn snapshot(&self) -> PortfolioResult<PortfolioSnapshot> {
        let holdings = self.store.list_all().await?;

        Ok(PortfolioSnapshot {
            holdings: calc::enrich_all(&holdings),
            summary: calc::summarize(&holdings),
            top: calc::top_by_roi(&holdings).ok(),
        })
    }

    /// Imports holdings from a CSV file with a header row and the columns
    /// `name,quantity,purchase_price,current_price`.
    ///
    /// Malformed files abort the import. Rows that parse but fail validation are skipped.
    pub async fn import_holdings(&self, path: &str) -> Result<ImportReport> {
        let mut reader = Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file at path: {}", path))?;
        let mut report = ImportReport::default();

        for (row_idx, record) in reader.records().enumerate() {
            let rec = record
                .with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;

            if rec.len() < 4 {
                return Err(Error::msg(format!(
                    "Invalid CSV format at row {}: expected at least 4 columns, found {}",
                    row_idx + 1,
                    rec.len()
                )));
            }

            let candidate = NewHolding::new(
                rec[0].to_string(),
                parse_decimal(&rec[1], "quantity")
                    .with_context(|| format!("Row {}", row_idx + 1))?,
                parse_decimal(&rec[2], "purchase price")
                    .with_context(|| format!("Row {}", row_idx + 1))?,
                parse_decimal(&rec[3], "current price")
                    .with_context(|| format!("Row {}", row_idx + 1))?,
            );

            match self.add_holding(candidate).await {
                Ok(_) => report.imported += 1,
                Err(err @ PortfolioError::InvalidInput { .. }) => {
                    warn!(row = row_idx + 1, "skipping holding: {}", err);
                    report.skipped += 1;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to store holding at row {}", row_idx + 1));
                }
            }
        }

        info!(
            imported = report.imported,
            skipped = report.skipped,
            "import finished"
        );

        Ok(report)
    }
}
