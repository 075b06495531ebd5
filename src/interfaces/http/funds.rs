use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

use super::response::{ApiResponse, ApiResult};
use crate::application::system::Application;
use crate::domain::fund::Fund;

pub async fn list_funds(State(app): State<Arc<Application>>) -> ApiResult<Vec<Fund>> {
    let funds = app.fund_service.list_funds().await?;
    let total: Decimal = funds.iter().map(|f| f.total_assets).sum();
    let count = funds.len();
    Ok(ApiResponse::ok(funds).with_count(count).with_total(total))
}

pub async fn get_fund(
    State(app): State<Arc<Application>>,
    Path(id): Path<String>,
) -> ApiResult<Fund> {
    Ok(ApiResponse::ok(app.fund_service.get_fund(&id).await?))
}

pub async fn create_fund(
    State(app): State<Arc<Application>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Fund> {
    let Json(body) = payload?;
    let fund = app.fund_service.create_fund(&body).await?;
    Ok(ApiResponse::created(fund).with_message("Fund created successfully"))
}

pub async fn update_fund(
    State(app): State<Arc<Application>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Fund> {
    let Json(body) = payload?;
    let fund = app.fund_service.update_fund(&id, &body).await?;
    Ok(ApiResponse::ok(fund).with_message("Fund updated successfully"))
}

pub async fn delete_fund(
    State(app): State<Arc<Application>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let deleted = app.fund_service.delete_fund(&id).await?;
    let message = format!("Fund '{}' deleted successfully", deleted.fund.name);
    let data = serde_json::json!({
        "id": deleted.fund.id,
        "name": deleted.fund.name,
        "obligations_removed": deleted.obligations_removed,
        "receivables_removed": deleted.receivables_removed,
        "subscriptions_removed": deleted.subscriptions_removed,
        "records_removed": deleted.dependents_removed(),
    });
    Ok(ApiResponse::ok(data).with_message(message))
}
