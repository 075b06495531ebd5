use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;

use super::response::{ApiResponse, ApiResult};
use crate::application::ledger_service::LedgerListing;
use crate::application::system::Application;
use crate::domain::ledger::{Obligation, Receivable, Subscription};

#[derive(Debug, Default, Deserialize)]
pub struct FundFilter {
    pub fund_id: Option<String>,
}

impl FundFilter {
    fn fund_id(&self) -> Option<&str> {
        self.fund_id.as_deref().filter(|id| !id.is_empty())
    }
}

fn listing<T: serde::Serialize>(listing: LedgerListing<T>) -> ApiResponse<Vec<T>> {
    ApiResponse::ok(listing.entries)
        .with_count(listing.count)
        .with_total(listing.total)
}

pub async fn list_obligations(
    State(app): State<Arc<Application>>,
    filter: Result<Query<FundFilter>, QueryRejection>,
) -> ApiResult<Vec<Obligation>> {
    let Query(filter) = filter?;
    Ok(listing(app.ledger_service.obligations(filter.fund_id()).await?))
}

pub async fn list_receivables(
    State(app): State<Arc<Application>>,
    filter: Result<Query<FundFilter>, QueryRejection>,
) -> ApiResult<Vec<Receivable>> {
    let Query(filter) = filter?;
    Ok(listing(app.ledger_service.receivables(filter.fund_id()).await?))
}

pub async fn list_subscriptions(
    State(app): State<Arc<Application>>,
    filter: Result<Query<FundFilter>, QueryRejection>,
) -> ApiResult<Vec<Subscription>> {
    let Query(filter) = filter?;
    Ok(listing(app.ledger_service.subscriptions(filter.fund_id()).await?))
}
