use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::domain::ports::Clock;
use crate::domain::repositories::{AssetRepository, FundRepository, LedgerRepository};
use crate::infrastructure::repositories::InMemoryTreasuryRepository;
use crate::infrastructure::seed::load_demo_data;

/// The store as seen through each repository trait. All handles point at the
/// same tables.
pub struct PersistenceHandle {
    pub fund_repository: Arc<dyn FundRepository>,
    pub ledger_repository: Arc<dyn LedgerRepository>,
    pub asset_repository: Arc<dyn AssetRepository>,
}

pub struct PersistenceBootstrap;

impl PersistenceBootstrap {
    pub async fn init(config: &Config, clock: &dyn Clock) -> Result<PersistenceHandle> {
        info!("Initializing in-memory treasury store");
        let store = InMemoryTreasuryRepository::new();

        if config.seed_demo_data {
            load_demo_data(&store, clock.today())
                .await
                .context("Failed to load demo data")?;
        } else {
            info!("Demo data disabled, starting with an empty registry");
        }

        let store = Arc::new(store);
        Ok(PersistenceHandle {
            fund_repository: store.clone(),
            ledger_repository: store.clone(),
            asset_repository: store,
        })
    }
}
