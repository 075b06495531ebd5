use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::asset_service::AssetService;
use crate::application::bootstrap::{
    persistence::PersistenceBootstrap,
    services::{ServicesBootstrap, ServicesHandle},
};
use crate::application::document_intake::DocumentIntake;
use crate::application::fund_service::FundService;
use crate::application::ledger_service::LedgerService;
use crate::application::reporting_service::ReportingService;
use crate::config::Config;
use crate::domain::ports::Clock;
use crate::domain::repositories::LedgerRepository;
use crate::infrastructure::observability::Metrics;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecordCounts {
    pub funds: usize,
    pub obligations: usize,
    pub receivables: usize,
    pub subscriptions: usize,
}

/// Application context handed to every request handler.
///
/// Owns the services, and through them the store; nothing is reachable as
/// ambient global state.
pub struct Application {
    pub config: Config,
    pub fund_service: Arc<FundService>,
    pub ledger_service: Arc<LedgerService>,
    pub reporting_service: Arc<ReportingService>,
    pub asset_service: Arc<AssetService>,
    pub document_intake: DocumentIntake,
    pub metrics: Metrics,
    pub clock: Arc<dyn Clock>,
    ledger_repository: Arc<dyn LedgerRepository>,
    started_at: Instant,
}

impl Application {
    pub async fn build(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        info!(
            "Building treasury application (seed demo data: {})",
            config.seed_demo_data
        );

        let metrics = Metrics::new()?;
        let persistence = PersistenceBootstrap::init(&config, clock.as_ref()).await?;
        let ServicesHandle {
            fund_service,
            ledger_service,
            reporting_service,
            asset_service,
            document_intake,
        } = ServicesBootstrap::init(&config, &persistence, clock.clone(), metrics.clone()).await?;

        info!(
            "Projection horizons {:?}, alert window {} days, outlier multiplier {}",
            config.projection_horizons, config.alert_window_days, config.outlier_multiplier
        );

        Ok(Self {
            config,
            fund_service,
            ledger_service,
            reporting_service,
            asset_service,
            document_intake,
            metrics,
            clock,
            ledger_repository: persistence.ledger_repository,
            started_at: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub async fn record_counts(&self) -> Result<RecordCounts> {
        let snapshot = self.ledger_repository.snapshot().await?;
        Ok(RecordCounts {
            funds: snapshot.funds.len(),
            obligations: snapshot.obligations.len(),
            receivables: snapshot.receivables.len(),
            subscriptions: snapshot.subscriptions.len(),
        })
    }
}
