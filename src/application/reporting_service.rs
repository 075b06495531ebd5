use crate::config::Config;
use crate::domain::analytics::outliers::OutlierReport;
use crate::domain::analytics::{
    ConsolidatedReport, FundDashboard, GeneratedReport, ProjectionSettings, ReportRequest,
    ReportTemplate, consolidate, detect_outliers, generate_report, project_cash_flow, report,
};
use crate::domain::errors::TreasuryError;
use crate::domain::ports::Clock;
use crate::domain::repositories::LedgerRepository;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ReportingSettings {
    pub projection: ProjectionSettings,
    pub outlier_multiplier: Decimal,
}

impl ReportingSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            projection: ProjectionSettings {
                horizons: config.projection_horizons.clone(),
                alert_window_days: config.alert_window_days,
            },
            outlier_multiplier: config.outlier_multiplier,
        }
    }
}

/// Derived views over the treasury tables. Every operation works on a single
/// consistent snapshot of the store.
pub struct ReportingService {
    ledger: Arc<dyn LedgerRepository>,
    clock: Arc<dyn Clock>,
    settings: ReportingSettings,
}

impl ReportingService {
    pub fn new(
        ledger: Arc<dyn LedgerRepository>,
        clock: Arc<dyn Clock>,
        settings: ReportingSettings,
    ) -> Self {
        Self {
            ledger,
            clock,
            settings,
        }
    }

    /// Cash-flow projection and due-date alerts for one fund.
    pub async fn dashboard(&self, fund_id: &str) -> Result<FundDashboard, TreasuryError> {
        let snapshot = self.ledger.snapshot().await?;
        let Some(fund) = snapshot.fund(fund_id) else {
            warn!("Dashboard requested for unknown fund {}", fund_id);
            return Err(TreasuryError::fund_not_found(fund_id));
        };

        let dashboard = project_cash_flow(
            fund,
            &snapshot.obligations,
            &snapshot.receivables,
            &snapshot.subscriptions,
            self.clock.today(),
            &self.settings.projection,
        );
        debug!(
            "Dashboard for {}: {} horizons, {} alerts",
            fund_id,
            dashboard.projections.len(),
            dashboard.alerts.len()
        );
        Ok(dashboard)
    }

    pub async fn consolidated(&self) -> Result<ConsolidatedReport, TreasuryError> {
        let snapshot = self.ledger.snapshot().await?;
        let report = consolidate(&snapshot);
        debug!(
            "Consolidated report over {} funds: net projected {}",
            report.fund_count, report.net_projected_balance
        );
        Ok(report)
    }

    pub async fn outliers(&self) -> Result<OutlierReport, TreasuryError> {
        let snapshot = self.ledger.snapshot().await?;
        let multiplier = self.settings.outlier_multiplier;
        let report = OutlierReport {
            multiplier,
            obligations: detect_outliers(&snapshot.obligations, multiplier),
            receivables: detect_outliers(&snapshot.receivables, multiplier),
        };
        debug!(
            "Outlier scan: {} obligations flagged, {} receivables flagged",
            report.obligations.outliers.len(),
            report.receivables.outliers.len()
        );
        Ok(report)
    }

    pub async fn generate(&self, request: &ReportRequest) -> Result<GeneratedReport, TreasuryError> {
        let snapshot = self.ledger.snapshot().await?;
        let report = generate_report(request, &snapshot, self.clock.now());
        info!(
            "Generated {:?} report for {} funds",
            report.report_type,
            report.fund_ids.len()
        );
        Ok(report)
    }

    pub fn templates(&self) -> Vec<ReportTemplate> {
        report::templates()
    }
}
