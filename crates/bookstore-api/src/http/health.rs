//! Health and metrics endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use bookstore_core::CollectionCounts;
use bookstore_telemetry::build_sha;
use serde::Serialize;
use tracing::error;

use crate::http::constants::PROMETHEUS_CONTENT_TYPE;
use crate::state::ApiState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: String,
    pub(crate) collections: CollectionCounts,
    pub(crate) mutations_total: u64,
}

pub(crate) async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    state.refresh_record_gauges();
    let snapshot = state.telemetry.snapshot();
    Json(HealthResponse {
        status: "ok",
        build: build_sha().to_string(),
        collections: state.catalog.counts(),
        mutations_total: snapshot.mutations_total,
    })
}

pub(crate) async fn metrics(State(state): State<Arc<ApiState>>) -> Response {
    match state.telemetry.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)
            .body(Body::from(body))
            .unwrap_or_else(|err| {
                error!(error = %err, "failed to build metrics response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
