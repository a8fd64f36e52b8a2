pub mod clients;
pub mod dispatch;
pub mod inventory;
pub mod jobs;
pub mod notifications;
pub mod technicians;
pub mod vans;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::engine::dashboard::{dashboard_metrics, DashboardMetrics};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    router_with_static(state, "static")
}

pub fn router_with_static(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .merge(vans::router())
        .merge(technicians::router())
        .merge(clients::router())
        .merge(jobs::router())
        .merge(dispatch::router())
        .merge(inventory::router())
        .merge(notifications::router())
        .route("/dashboard", get(dashboard))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .fallback_service(ServeDir::new(static_dir))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    vans: usize,
    technicians: usize,
    clients: usize,
    jobs: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        vans: state.vans.len(),
        technicians: state.technicians.len(),
        clients: state.clients.len(),
        jobs: state.jobs.len(),
    })
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardMetrics> {
    Json(dashboard_metrics(
        &state.job_list(),
        &state.van_list(),
        &state.technician_list(),
        &state.notification_list(),
        Utc::now().date_naive(),
    ))
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
