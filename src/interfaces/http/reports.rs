use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use std::sync::Arc;

use super::response::{ApiResponse, ApiResult};
use crate::application::system::Application;
use crate::domain::analytics::{
    ConsolidatedReport, FundDashboard, GeneratedReport, OutlierReport, ReportRequest,
    ReportTemplate,
};

pub async fn dashboard(
    State(app): State<Arc<Application>>,
    Path(fund_id): Path<String>,
) -> ApiResult<FundDashboard> {
    Ok(ApiResponse::ok(app.reporting_service.dashboard(&fund_id).await?))
}

pub async fn consolidated(State(app): State<Arc<Application>>) -> ApiResult<ConsolidatedReport> {
    Ok(ApiResponse::ok(app.reporting_service.consolidated().await?))
}

pub async fn outliers(State(app): State<Arc<Application>>) -> ApiResult<OutlierReport> {
    Ok(ApiResponse::ok(app.reporting_service.outliers().await?))
}

/// An empty body requests the complete report over every fund.
pub async fn generate(
    State(app): State<Arc<Application>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResult<GeneratedReport> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => ReportRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let report = app.reporting_service.generate(&request).await?;
    Ok(ApiResponse::ok(report).with_message("Report generated successfully"))
}

pub async fn templates(State(app): State<Arc<Application>>) -> ApiResult<Vec<ReportTemplate>> {
    let templates = app.reporting_service.templates();
    let count = templates.len();
    Ok(ApiResponse::ok(templates).with_count(count))
}
