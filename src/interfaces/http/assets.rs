use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use std::sync::Arc;

use super::response::{ApiResponse, ApiResult};
use crate::application::system::Application;
use crate::domain::asset::{ASSET_KINDS, NewAsset, RegisteredAsset, VariableRateIndex};

#[derive(Debug, Serialize)]
pub struct AssetCatalogue {
    pub asset_kinds: &'static [&'static str],
    pub variable_rate_indices: [VariableRateIndex; 5],
}

pub async fn register_asset(
    State(app): State<Arc<Application>>,
    payload: Result<Json<NewAsset>, JsonRejection>,
) -> ApiResult<RegisteredAsset> {
    let Json(new_asset) = payload?;
    let asset = app.asset_service.register(new_asset).await?;
    Ok(ApiResponse::created(asset).with_message("Asset registered successfully"))
}

pub async fn list_assets(State(app): State<Arc<Application>>) -> ApiResult<Vec<RegisteredAsset>> {
    let assets = app.asset_service.list().await?;
    let count = assets.len();
    Ok(ApiResponse::ok(assets).with_count(count))
}

pub async fn asset_kinds() -> ApiResult<AssetCatalogue> {
    Ok(ApiResponse::ok(AssetCatalogue {
        asset_kinds: ASSET_KINDS,
        variable_rate_indices: VariableRateIndex::ALL,
    }))
}
