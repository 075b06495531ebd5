//! HTTP JSON API.

pub mod assets;
pub mod funds;
pub mod ledger;
pub mod reports;
pub mod response;
pub mod system;

use axum::Router;
use axum::body::Body;
use axum::extract::{MatchedPath, State};
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{Instrument, debug};

use crate::application::system::Application;

pub fn router(app: Arc<Application>) -> Router {
    let cors_enabled = app.config.cors_enabled;

    let router = Router::new()
        .route("/funds", get(funds::list_funds).post(funds::create_fund))
        .route(
            "/funds/{id}",
            get(funds::get_fund)
                .put(funds::update_fund)
                .delete(funds::delete_fund),
        )
        .route("/obligations", get(ledger::list_obligations))
        .route("/receivables", get(ledger::list_receivables))
        .route("/subscriptions", get(ledger::list_subscriptions))
        .route("/dashboard/{fund_id}", get(reports::dashboard))
        .route("/reports", get(reports::consolidated))
        .route("/reports/generate", post(reports::generate))
        .route("/reports/templates", get(reports::templates))
        .route("/outliers", get(reports::outliers))
        .route("/documents", post(system::submit_document))
        .route("/assets", get(assets::list_assets).post(assets::register_asset))
        .route("/assets/kinds", get(assets::asset_kinds))
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route_layer(middleware::from_fn_with_state(app.clone(), track_requests))
        .with_state(app);

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Runs only for matched routes (`route_layer`), so the route template is
/// always available.
async fn track_requests(
    State(app): State<Arc<Application>>,
    matched_path: MatchedPath,
    request: Request<Body>,
    next: Next,
) -> Response {
    let route = matched_path.as_str().to_string();
    let method = request.method().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);
    let started = Instant::now();

    let response = next.run(request).instrument(span).await;

    let status = response.status().as_u16();
    let elapsed = started.elapsed().as_secs_f64();
    debug!("{} {} -> {} in {:.3}ms", method, route, status, elapsed * 1000.0);
    app.metrics.observe_request(&route, &method, status, elapsed);
    response
}
