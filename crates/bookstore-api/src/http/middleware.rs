//! Per-request middleware: task-local context for handler logs and the request counter.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use bookstore_telemetry::{Metrics, RequestContext};
use tracing::Span;

use crate::http::constants::HEADER_REQUEST_ID;

/// Run the handler inside a [`RequestContext`] and count the response under
/// the matched route template.
///
/// Installed with `route_layer`, so unmatched paths never reach it.
pub(crate) async fn track_request(
    State(telemetry): State<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let route = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_owned(),
        |matched| matched.as_str().to_owned(),
    );
    let request_id = request
        .headers()
        .get(HEADER_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let context = RequestContext::new(request_id, &route);
    context.record_on(&Span::current());

    let response = context.scope(next.run(request)).await;
    telemetry.inc_http_request(&route, response.status().as_u16());
    response
}
