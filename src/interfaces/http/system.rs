use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::response::{ApiResponse, ApiResult};
use crate::application::document_intake::ProcessedDocument;
use crate::application::system::{Application, RecordCounts};
use crate::domain::errors::TreasuryError;

pub const SERVICE_NAME: &str = "fundtreasury";

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub records: RecordCounts,
}

pub async fn health(State(app): State<Arc<Application>>) -> ApiResult<HealthReport> {
    let records = app.record_counts().await.map_err(TreasuryError::from)?;
    Ok(ApiResponse::ok(HealthReport {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: app.clock.now(),
        uptime_seconds: app.uptime_seconds(),
        records,
    }))
}

pub async fn metrics(State(app): State<Arc<Application>>) -> impl IntoResponse {
    app.metrics.uptime_seconds.set(app.uptime_seconds() as f64);
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        app.metrics.render(),
    )
}

/// Accepts any submission; the body is not read.
pub async fn submit_document(State(app): State<Arc<Application>>) -> ApiResult<ProcessedDocument> {
    let document = app.document_intake.process();
    Ok(ApiResponse::ok(document).with_message("Document processed"))
}
