//! In-Memory Repository Implementation
//!
//! One store object backs every repository trait in
//! `domain::repositories`. All tables sit behind a single `tokio::sync::RwLock`
//! so reads share access and every mutation, cascade delete included, is
//! applied under one write guard.
//!
//! # Limitations
//!
//! - Data is lost on application restart
//! - No persistence across multiple instances

use crate::domain::asset::RegisteredAsset;
use crate::domain::fund::{Fund, FundPatch, next_fund_id};
use crate::domain::ledger::{Obligation, Receivable, Subscription, filter_by_fund};
use crate::domain::repositories::{
    AssetRepository, DeletedFund, FundRepository, LedgerRepository, TreasurySnapshot,
};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct TreasuryTables {
    funds: BTreeMap<String, Fund>,
    obligations: Vec<Obligation>,
    receivables: Vec<Receivable>,
    subscriptions: Vec<Subscription>,
    assets: Vec<RegisteredAsset>,
}

impl TreasuryTables {
    fn ensure_fund(&self, fund_id: &str) -> Result<()> {
        if !self.funds.contains_key(fund_id) {
            bail!("Unknown fund reference: {}", fund_id);
        }
        Ok(())
    }
}

/// Thread-safe in-memory treasury store
#[derive(Clone, Default)]
pub struct InMemoryTreasuryRepository {
    tables: Arc<RwLock<TreasuryTables>>,
}

impl InMemoryTreasuryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FundRepository for InMemoryTreasuryRepository {
    async fn list_funds(&self) -> Result<Vec<Fund>> {
        Ok(self.tables.read().await.funds.values().cloned().collect())
    }

    async fn find_fund(&self, id: &str) -> Result<Option<Fund>> {
        Ok(self.tables.read().await.funds.get(id).cloned())
    }

    async fn insert_fund(&self, mut fund: Fund) -> Result<Fund> {
        let mut tables = self.tables.write().await;
        fund.id = next_fund_id(tables.funds.len(), |candidate| {
            tables.funds.contains_key(candidate)
        });
        tables.funds.insert(fund.id.clone(), fund.clone());
        Ok(fund)
    }

    async fn update_fund(&self, id: &str, patch: FundPatch) -> Result<Option<Fund>> {
        let mut tables = self.tables.write().await;
        Ok(tables.funds.get_mut(id).map(|fund| {
            patch.apply_to(fund);
            fund.clone()
        }))
    }

    async fn delete_fund(&self, id: &str) -> Result<Option<DeletedFund>> {
        let mut tables = self.tables.write().await;
        let Some(fund) = tables.funds.remove(id) else {
            return Ok(None);
        };

        let before = tables.obligations.len();
        tables.obligations.retain(|o| o.fund_id != id);
        let obligations_removed = before - tables.obligations.len();

        let before = tables.receivables.len();
        tables.receivables.retain(|r| r.fund_id != id);
        let receivables_removed = before - tables.receivables.len();

        let before = tables.subscriptions.len();
        tables.subscriptions.retain(|s| s.fund_id != id);
        let subscriptions_removed = before - tables.subscriptions.len();

        Ok(Some(DeletedFund {
            fund,
            obligations_removed,
            receivables_removed,
            subscriptions_removed,
        }))
    }

    async fn count_funds(&self) -> Result<usize> {
        Ok(self.tables.read().await.funds.len())
    }
}

#[async_trait]
impl LedgerRepository for InMemoryTreasuryRepository {
    async fn obligations(&self, fund_id: Option<&str>) -> Result<Vec<Obligation>> {
        Ok(filter_by_fund(&self.tables.read().await.obligations, fund_id))
    }

    async fn receivables(&self, fund_id: Option<&str>) -> Result<Vec<Receivable>> {
        Ok(filter_by_fund(&self.tables.read().await.receivables, fund_id))
    }

    async fn subscriptions(&self, fund_id: Option<&str>) -> Result<Vec<Subscription>> {
        Ok(filter_by_fund(&self.tables.read().await.subscriptions, fund_id))
    }

    async fn add_obligation(&self, obligation: Obligation) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_fund(&obligation.fund_id)?;
        tables.obligations.push(obligation);
        Ok(())
    }

    async fn add_receivable(&self, receivable: Receivable) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_fund(&receivable.fund_id)?;
        tables.receivables.push(receivable);
        Ok(())
    }

    async fn add_subscription(&self, subscription: Subscription) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_fund(&subscription.fund_id)?;
        tables.subscriptions.push(subscription);
        Ok(())
    }

    async fn snapshot(&self) -> Result<TreasurySnapshot> {
        let tables = self.tables.read().await;
        Ok(TreasurySnapshot {
            funds: tables.funds.values().cloned().collect(),
            obligations: tables.obligations.clone(),
            receivables: tables.receivables.clone(),
            subscriptions: tables.subscriptions.clone(),
        })
    }
}

#[async_trait]
impl AssetRepository for InMemoryTreasuryRepository {
    async fn save_asset(&self, asset: RegisteredAsset) -> Result<()> {
        self.tables.write().await.assets.push(asset);
        Ok(())
    }

    async fn list_assets(&self) -> Result<Vec<RegisteredAsset>> {
        Ok(self.tables.read().await.assets.clone())
    }
}
