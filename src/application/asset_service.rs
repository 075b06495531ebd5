use crate::domain::asset::{NewAsset, RegisteredAsset};
use crate::domain::errors::TreasuryError;
use crate::domain::ports::Clock;
use crate::domain::repositories::AssetRepository;
use crate::infrastructure::observability::Metrics;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Registration of portfolio assets.
pub struct AssetService {
    repository: Arc<dyn AssetRepository>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
}

impl AssetService {
    pub fn new(repository: Arc<dyn AssetRepository>, clock: Arc<dyn Clock>, metrics: Metrics) -> Self {
        Self {
            repository,
            clock,
            metrics,
        }
    }

    pub async fn register(&self, new_asset: NewAsset) -> Result<RegisteredAsset, TreasuryError> {
        let id = Uuid::new_v4().simple().to_string()[..8].to_string();
        let asset = new_asset
            .validate(id, self.clock.now())
            .inspect_err(|e| warn!("Asset registration rejected: {}", e))?;

        self.repository.save_asset(asset.clone()).await?;
        info!(
            "Asset registered: {} ({}, document: {})",
            asset.id, asset.asset_kind, asset.document_name
        );
        self.metrics.inc_mutation("asset", "create");
        Ok(asset)
    }

    pub async fn list(&self) -> Result<Vec<RegisteredAsset>, TreasuryError> {
        Ok(self.repository.list_assets().await?)
    }
}
