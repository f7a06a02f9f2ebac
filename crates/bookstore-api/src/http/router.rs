//! Router construction and server host for the API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router, ServiceExt,
    body::Body,
    http::{HeaderName, Method, Request, header::CONTENT_TYPE},
    middleware,
    routing::get,
};
use bookstore_core::{Author, Book, Catalog, CatalogEntity, Category};
use bookstore_telemetry::{Metrics, build_sha};
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::constants::HEADER_REQUEST_ID;
use crate::http::entities::{create, get_one, list, remove, upsert};
use crate::http::health::{health, metrics};
use crate::http::info::root;
use crate::http::middleware::track_request;
use crate::state::ApiState;

/// Routed application with trailing slashes trimmed before routing.
pub type BookstoreApp = NormalizePath<Router>;

/// Axum router wrapper that hosts the bookstore API.
pub struct ApiServer {
    app: BookstoreApp,
}

impl ApiServer {
    /// Build the router over `catalog`, reporting into `telemetry`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, telemetry: Metrics) -> Self {
        let state = Arc::new(ApiState::new(catalog, telemetry.clone()));
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(HEADER_REQUEST_ID)]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    collection = tracing::field::Empty,
                    request_id = tracing::field::Empty,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        // Ids are assigned outside propagation so generated ids are echoed too.
        let layered = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(telemetry, track_request));

        let router = Self::build_router()
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self {
            app: NormalizePathLayer::trim_trailing_slash().layer(router),
        }
    }

    fn build_router() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .merge(Self::collection_routes::<Book>())
            .merge(Self::collection_routes::<Author>())
            .merge(Self::collection_routes::<Category>())
    }

    fn collection_routes<T: CatalogEntity>() -> Router<Arc<ApiState>> {
        let collection = format!("/{}", T::COLLECTION);
        let member = format!("/{}/{{id}}", T::COLLECTION);
        Router::new()
            .route(&collection, get(list::<T>).post(create::<T>))
            .route(
                &member,
                get(get_one::<T>).put(upsert::<T>).delete(remove::<T>),
            )
    }

    /// Clone of the fully layered application, for in-process callers.
    #[must_use]
    pub fn router(&self) -> BookstoreApp {
        self.app.clone()
    }

    /// Serve the API on `addr` until the listener terminates.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        let local = listener
            .local_addr()
            .map_err(|source| ApiServerError::LocalAddr { source })?;
        tracing::info!(addr = %local, "bookstore api accepting connections");
        axum::serve(
            listener,
            ServiceExt::<Request<Body>>::into_make_service(self.app),
        )
        .await
        .map_err(|source| ApiServerError::Serve {
            addr: local,
            source,
        })
    }
}
