//! Process span and per-request context.
//!
//! # Design
//! - The process span carries the listen address and build SHA for every log line.
//! - Each request runs inside a task-local [`RequestContext`]; handlers read it
//!   through [`current_request`] instead of threading ids through arguments.
//! - The catalog collection is derived once from the matched route.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{Span, span::Entered};

use crate::init::build_sha;
use crate::metrics::COLLECTIONS;

/// Keeps the process-level `bookstore` span entered for the lifetime of the guard.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter the process span for a server listening on `listen`.
    #[must_use]
    pub fn new(listen: SocketAddr) -> Self {
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "bookstore",
            listen = %listen,
            build_sha = %build_sha()
        )));
        Self {
            _guard: span.enter(),
        }
    }
}

/// Identity of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Arc<str>,
    route: Arc<str>,
    collection: Option<&'static str>,
}

impl RequestContext {
    /// Context for `route` (matched template or raw path) tagged with `request_id`.
    #[must_use]
    pub fn new(request_id: &str, route: &str) -> Self {
        let first_segment = route.trim_start_matches('/').split('/').next();
        let collection = first_segment.and_then(|segment| {
            COLLECTIONS
                .into_iter()
                .find(|collection| *collection == segment)
        });
        Self {
            request_id: Arc::from(request_id),
            route: Arc::from(route),
            collection,
        }
    }

    /// Value of the `x-request-id` header; empty when none was assigned.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Route template the router matched, e.g. `/books/{id}`.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Catalog collection the route addresses; `None` for `/`, `/health`, `/metrics`.
    #[must_use]
    pub const fn collection(&self) -> Option<&'static str> {
        self.collection
    }

    /// Record the identifiers on `span`. Fields the span did not declare are skipped.
    pub fn record_on(&self, span: &Span) {
        span.record("request_id", &*self.request_id);
        span.record("route", &*self.route);
        if let Some(collection) = self.collection {
            span.record("collection", collection);
        }
    }

    /// Run `fut` with this context visible to [`current_request`].
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        ACTIVE_REQUEST.scope(self, fut).await
    }
}

/// Context of the request currently being served, if any.
#[must_use]
pub fn current_request() -> Option<RequestContext> {
    ACTIVE_REQUEST.try_with(Clone::clone).ok()
}

tokio::task_local! {
    static ACTIVE_REQUEST: RequestContext;
}
