use tokio::sync::Mutex;

use crate::{
    db::HoldingStore,
    error::PortfolioResult,
    models::{Holding, NewHolding},
};

/// A non-durable store keeping holdings in insertion order.
#[derive(Debug, Default)]
pub struct MemoryHoldingStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    holdings: Vec<Holding>,
}

impl MemoryHoldingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoldingStore for MemoryHoldingStore {
    async fn create(&self, holding: NewHolding) -> PortfolioResult<Holding> {
        let mut state = self.inner.lock().await;
        state.next_id += 1;
        let holding = holding.into_holding(state.next_id);
        state.holdings.push(holding.clone());
        Ok(holding)
    }

    async fn list_all(&self) -> PortfolioResult<Vec<Holding>> {
        Ok(self.inner.lock().await.holdings.clone())
    }

    async fn exists_by_id(&self, id: i64) -> PortfolioResult<bool> {
        let state = self.inner.lock().await;
        Ok(state.holdings.iter().any(|h| *h.id() == id))
    }

    async fn delete_by_id(&self, id: i64) -> PortfolioResult<()> {
        let mut state = self.inner.lock().await;
        state.holdings.retain(|h| *h.id() != id);
        Ok(())
    }
}
