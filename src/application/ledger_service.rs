use crate::domain::errors::TreasuryError;
use crate::domain::ledger::{CashFlowEntry, Obligation, Receivable, Subscription, total};
use crate::domain::repositories::LedgerRepository;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// A filtered set of ledger entries with its count and monetary total.
#[derive(Debug, Clone)]
pub struct LedgerListing<T> {
    pub entries: Vec<T>,
    pub count: usize,
    pub total: Decimal,
}

impl<T: CashFlowEntry> LedgerListing<T> {
    fn from_entries(entries: Vec<T>) -> Self {
        Self {
            count: entries.len(),
            total: total(&entries),
            entries,
        }
    }
}

/// Read-only queries over obligations, receivables and subscriptions.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepository>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    pub async fn obligations(
        &self,
        fund_id: Option<&str>,
    ) -> Result<LedgerListing<Obligation>, TreasuryError> {
        let listing = LedgerListing::from_entries(self.repository.obligations(fund_id).await?);
        debug!(
            "Obligations query (fund={:?}): {} entries, total {}",
            fund_id, listing.count, listing.total
        );
        Ok(listing)
    }

    pub async fn receivables(
        &self,
        fund_id: Option<&str>,
    ) -> Result<LedgerListing<Receivable>, TreasuryError> {
        let listing = LedgerListing::from_entries(self.repository.receivables(fund_id).await?);
        debug!(
            "Receivables query (fund={:?}): {} entries, total {}",
            fund_id, listing.count, listing.total
        );
        Ok(listing)
    }

    pub async fn subscriptions(
        &self,
        fund_id: Option<&str>,
    ) -> Result<LedgerListing<Subscription>, TreasuryError> {
        let listing = LedgerListing::from_entries(self.repository.subscriptions(fund_id).await?);
        debug!(
            "Subscriptions query (fund={:?}): {} entries, total {}",
            fund_id, listing.count, listing.total
        );
        Ok(listing)
    }
}
