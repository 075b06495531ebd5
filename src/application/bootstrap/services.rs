use anyhow::Result;
use std::sync::Arc;

use crate::application::asset_service::AssetService;
use crate::application::bootstrap::persistence::PersistenceHandle;
use crate::application::document_intake::DocumentIntake;
use crate::application::fund_service::FundService;
use crate::application::ledger_service::LedgerService;
use crate::application::reporting_service::{ReportingService, ReportingSettings};
use crate::config::Config;
use crate::domain::ports::Clock;
use crate::infrastructure::observability::Metrics;

pub struct ServicesHandle {
    pub fund_service: Arc<FundService>,
    pub ledger_service: Arc<LedgerService>,
    pub reporting_service: Arc<ReportingService>,
    pub asset_service: Arc<AssetService>,
    pub document_intake: DocumentIntake,
}

pub struct ServicesBootstrap;

impl ServicesBootstrap {
    pub async fn init(
        config: &Config,
        persistence: &PersistenceHandle,
        clock: Arc<dyn Clock>,
        metrics: Metrics,
    ) -> Result<ServicesHandle> {
        let fund_service = Arc::new(FundService::new(
            persistence.fund_repository.clone(),
            clock.clone(),
            metrics.clone(),
            config.default_redemption_days,
        ));
        fund_service.refresh_fund_gauge().await?;

        let ledger_service = Arc::new(LedgerService::new(persistence.ledger_repository.clone()));

        let reporting_service = Arc::new(ReportingService::new(
            persistence.ledger_repository.clone(),
            clock.clone(),
            ReportingSettings::from_config(config),
        ));

        let asset_service = Arc::new(AssetService::new(
            persistence.asset_repository.clone(),
            clock,
            metrics,
        ));

        Ok(ServicesHandle {
            fund_service,
            ledger_service,
            reporting_service,
            asset_service,
            document_intake: DocumentIntake,
        })
    }
}
