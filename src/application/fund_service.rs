use crate::domain::errors::TreasuryError;
use crate::domain::fund::{Fund, FundPatch, NewFund};
use crate::domain::ports::Clock;
use crate::domain::repositories::{DeletedFund, FundRepository};
use crate::infrastructure::observability::Metrics;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fund registry: create, read, update and cascade delete.
pub struct FundService {
    repository: Arc<dyn FundRepository>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
    default_redemption_days: u32,
}

impl FundService {
    pub fn new(
        repository: Arc<dyn FundRepository>,
        clock: Arc<dyn Clock>,
        metrics: Metrics,
        default_redemption_days: u32,
    ) -> Self {
        Self {
            repository,
            clock,
            metrics,
            default_redemption_days,
        }
    }

    pub async fn list_funds(&self) -> Result<Vec<Fund>, TreasuryError> {
        let funds = self.repository.list_funds().await?;
        debug!("Listing {} funds", funds.len());
        Ok(funds)
    }

    pub async fn get_fund(&self, id: &str) -> Result<Fund, TreasuryError> {
        self.repository.find_fund(id).await?.ok_or_else(|| {
            warn!("Fund lookup failed: {} not found", id);
            TreasuryError::fund_not_found(id)
        })
    }

    /// Create a fund from a raw JSON body.
    pub async fn create_fund(&self, body: &Value) -> Result<Fund, TreasuryError> {
        let new_fund = NewFund::from_json(body).inspect_err(|e| {
            warn!("Fund creation rejected: {}", e);
        })?;

        let draft = new_fund.into_fund(self.clock.today(), self.default_redemption_days);
        let fund = self.repository.insert_fund(draft).await?;

        info!("Fund created: {} ({})", fund.id, fund.name);
        self.metrics.inc_mutation("fund", "create");
        self.refresh_fund_gauge().await?;
        Ok(fund)
    }

    pub async fn update_fund(&self, id: &str, body: &Value) -> Result<Fund, TreasuryError> {
        let patch = FundPatch::from_json(body).inspect_err(|e| {
            warn!("Fund update rejected for {}: {}", id, e);
        })?;
        if patch.is_empty() {
            debug!("Fund update for {} carries no known fields", id);
        }

        let fund = self
            .repository
            .update_fund(id, patch)
            .await?
            .ok_or_else(|| TreasuryError::fund_not_found(id))?;

        info!("Fund updated: {} ({})", fund.id, fund.name);
        self.metrics.inc_mutation("fund", "update");
        Ok(fund)
    }

    /// Delete a fund together with its obligations, receivables and subscriptions.
    pub async fn delete_fund(&self, id: &str) -> Result<DeletedFund, TreasuryError> {
        let deleted = self
            .repository
            .delete_fund(id)
            .await?
            .ok_or_else(|| TreasuryError::fund_not_found(id))?;

        info!(
            "Fund deleted: {} ({}), cascaded {} obligations, {} receivables, {} subscriptions",
            deleted.fund.id,
            deleted.fund.name,
            deleted.obligations_removed,
            deleted.receivables_removed,
            deleted.subscriptions_removed
        );
        self.metrics.inc_mutation("fund", "delete");
        self.refresh_fund_gauge().await?;
        Ok(deleted)
    }

    pub async fn refresh_fund_gauge(&self) -> Result<(), TreasuryError> {
        let count = self.repository.count_funds().await?;
        self.metrics.funds_registered.set(count as f64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fund::FundStatus;
    use crate::infrastructure::{FixedClock, InMemoryTreasuryRepository};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn service() -> FundService {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        FundService::new(
            Arc::new(InMemoryTreasuryRepository::new()),
            Arc::new(clock),
            Metrics::new().unwrap(),
            30,
        )
    }

    fn body() -> Value {
        json!({
            "name": "Boreal Multimercado",
            "tax_id": "99.888.777/0001-66",
            "total_assets": 2000000,
            "liquid_assets": 400000,
            "liquidity_policy": "conservative",
            "manager": "Boreal Gestão",
            "admin_fee": 0.012
        })
    }

    #[tokio::test]
    async fn test_create_stamps_today_and_defaults() {
        let service = service();
        let fund = service.create_fund(&body()).await.unwrap();

        assert_eq!(fund.id, "fund-001");
        assert_eq!(fund.status, FundStatus::Active);
        assert_eq!(fund.redemption_notice_days, 30);
        assert_eq!(fund.created_on, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(service.metrics.funds_registered.get(), 1.0);
    }

    #[tokio::test]
    async fn test_explicit_redemption_days_kept() {
        let service = service();
        let mut payload = body();
        payload["redemption_notice_days"] = json!(90);
        let fund = service.create_fund(&payload).await.unwrap();
        assert_eq!(fund.redemption_notice_days, 90);
    }

    #[tokio::test]
    async fn test_update_missing_fund() {
        let service = service();
        let result = service
            .update_fund("fund-404", &json!({ "name": "Ghost" }))
            .await;
        assert!(matches!(result, Err(TreasuryError::FundNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_coerces_fields() {
        let service = service();
        let fund = service.create_fund(&body()).await.unwrap();

        let updated = service
            .update_fund(
                &fund.id,
                &json!({ "liquid_assets": "450000.75", "redemption_notice_days": "15" }),
            )
            .await
            .unwrap();
        assert_eq!(updated.liquid_assets, dec!(450000.75));
        assert_eq!(updated.redemption_notice_days, 15);
        assert_eq!(updated.manager, "Boreal Gestão");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let fund = service.create_fund(&body()).await.unwrap();

        let deleted = service.delete_fund(&fund.id).await.unwrap();
        assert_eq!(deleted.fund.name, "Boreal Multimercado");
        assert!(matches!(
            service.get_fund(&fund.id).await,
            Err(TreasuryError::FundNotFound { .. })
        ));
        assert!(matches!(
            service.delete_fund(&fund.id).await,
            Err(TreasuryError::FundNotFound { .. })
        ));
    }
}
