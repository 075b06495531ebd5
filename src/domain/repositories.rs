//! Repository Pattern Abstractions
//!
//! Services only see these traits; the tables behind them are owned by the
//! application context and handed to each service at build time.
//!
//! - `FundRepository`: fund registry, including cascade delete
//! - `LedgerRepository`: obligations, receivables and subscriptions
//! - `AssetRepository`: registered portfolio assets
//!
//! `InMemoryTreasuryRepository` implements all three over one shared lock so
//! a cascade delete never leaves orphaned records visible.

use crate::domain::asset::RegisteredAsset;
use crate::domain::fund::{Fund, FundPatch};
use crate::domain::ledger::{Obligation, Receivable, Subscription};
use anyhow::Result;
use async_trait::async_trait;

/// Outcome of a cascade delete.
#[derive(Debug, Clone)]
pub struct DeletedFund {
    pub fund: Fund,
    pub obligations_removed: usize,
    pub receivables_removed: usize,
    pub subscriptions_removed: usize,
}

impl DeletedFund {
    pub fn dependents_removed(&self) -> usize {
        self.obligations_removed + self.receivables_removed + self.subscriptions_removed
    }
}

/// Consistent copy of every table, taken under a single read.
#[derive(Debug, Clone, Default)]
pub struct TreasurySnapshot {
    pub funds: Vec<Fund>,
    pub obligations: Vec<Obligation>,
    pub receivables: Vec<Receivable>,
    pub subscriptions: Vec<Subscription>,
}

impl TreasurySnapshot {
    pub fn fund(&self, id: &str) -> Option<&Fund> {
        self.funds.iter().find(|f| f.id == id)
    }
}

#[async_trait]
pub trait FundRepository: Send + Sync {
    /// All funds ordered by id
    async fn list_funds(&self) -> Result<Vec<Fund>>;

    async fn find_fund(&self, id: &str) -> Result<Option<Fund>>;

    /// Store a new fund under the next free sequential id and return it
    async fn insert_fund(&self, fund: Fund) -> Result<Fund>;

    /// Apply a partial update in place; `None` when the fund does not exist
    async fn update_fund(&self, id: &str, patch: FundPatch) -> Result<Option<Fund>>;

    /// Remove the fund and every record referencing it
    async fn delete_fund(&self, id: &str) -> Result<Option<DeletedFund>>;

    async fn count_funds(&self) -> Result<usize>;
}

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn obligations(&self, fund_id: Option<&str>) -> Result<Vec<Obligation>>;

    async fn receivables(&self, fund_id: Option<&str>) -> Result<Vec<Receivable>>;

    async fn subscriptions(&self, fund_id: Option<&str>) -> Result<Vec<Subscription>>;

    /// Fails when the referenced fund does not exist
    async fn add_obligation(&self, obligation: Obligation) -> Result<()>;

    async fn add_receivable(&self, receivable: Receivable) -> Result<()>;

    async fn add_subscription(&self, subscription: Subscription) -> Result<()>;

    async fn snapshot(&self) -> Result<TreasurySnapshot>;
}

#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn save_asset(&self, asset: RegisteredAsset) -> Result<()>;

    async fn list_assets(&self) -> Result<Vec<RegisteredAsset>>;
}
