//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Collector registration stays private; callers only see typed helpers.
//! - Per-collection series are created up front so they render before the
//!   first mutation.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Collection labels used by the catalog series.
pub const COLLECTIONS: [&str; 3] = ["books", "authors", "categories"];

/// Mutation outcome labels used by `catalog_mutations_total`.
pub const MUTATION_OPS: [&str; 4] = ["created", "updated", "deleted", "noop"];

/// Series exported by [`Metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    /// `http_requests_total{route,code}`.
    HttpRequests,
    /// `catalog_records{collection}`.
    CatalogRecords,
    /// `catalog_mutations_total{collection,op}`.
    CatalogMutations,
}

impl Series {
    /// Exposition name of the series.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HttpRequests => "http_requests_total",
            Self::CatalogRecords => "catalog_records",
            Self::CatalogMutations => "catalog_mutations_total",
        }
    }

    const fn help(self) -> &'static str {
        match self {
            Self::HttpRequests => "Total HTTP requests received",
            Self::CatalogRecords => "Records currently held per collection",
            Self::CatalogMutations => "Catalog mutations by collection and outcome",
        }
    }

    const fn labels(self) -> &'static [&'static str] {
        match self {
            Self::HttpRequests => &["route", "code"],
            Self::CatalogRecords => &["collection"],
            Self::CatalogMutations => &["collection", "op"],
        }
    }

    fn opts(self) -> Opts {
        Opts::new(self.name(), self.help())
    }
}

impl Display for Series {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Prometheus-backed metrics registry shared by the router and handlers.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    catalog_records: IntGaugeVec,
    catalog_mutations_total: IntCounterVec,
}

/// Point-in-time view of the catalog series for health reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Last recorded number of books.
    pub books: i64,
    /// Last recorded number of authors.
    pub authors: i64,
    /// Last recorded number of categories.
    pub categories: i64,
    /// Mutations applied across every collection.
    pub mutations_total: u64,
}

impl Metrics {
    /// Construct a registry with every [`Series`] registered and the record
    /// gauges zeroed.
    ///
    /// # Errors
    ///
    /// Returns an error if a series cannot be built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let http_requests_total = counter(&registry, Series::HttpRequests)?;
        let catalog_records = gauge(&registry, Series::CatalogRecords)?;
        let catalog_mutations_total = counter(&registry, Series::CatalogMutations)?;

        for collection in COLLECTIONS {
            catalog_records.with_label_values(&[collection]).set(0);
        }

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                catalog_records,
                catalog_mutations_total,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Record the current record count of `collection`.
    pub fn set_catalog_records(&self, collection: &str, count: usize) {
        self.inner
            .catalog_records
            .with_label_values(&[collection])
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Count one mutation of `collection` with outcome `op`.
    pub fn inc_catalog_mutation(&self, collection: &str, op: &str) {
        self.inner
            .catalog_mutations_total
            .with_label_values(&[collection, op])
            .inc();
    }

    /// Mutations of `collection` recorded with outcome `op`.
    #[must_use]
    pub fn catalog_mutations(&self, collection: &str, op: &str) -> u64 {
        self.inner
            .catalog_mutations_total
            .with_label_values(&[collection, op])
            .get()
    }

    /// Render the registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::Exposition { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::ExpositionUtf8 { source })
    }

    /// Take a point-in-time snapshot of the catalog series.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let records = |collection: &str| {
            self.inner
                .catalog_records
                .with_label_values(&[collection])
                .get()
        };
        let mutations_total = COLLECTIONS
            .iter()
            .flat_map(|collection| MUTATION_OPS.iter().map(move |op| (*collection, *op)))
            .map(|(collection, op)| self.catalog_mutations(collection, op))
            .sum();
        MetricsSnapshot {
            books: records("books"),
            authors: records("authors"),
            categories: records("categories"),
            mutations_total,
        }
    }
}

fn counter(registry: &Registry, series: Series) -> Result<IntCounterVec> {
    let collector = IntCounterVec::new(series.opts(), series.labels())
        .map_err(|source| TelemetryError::SeriesBuild { series, source })?;
    register(registry, series, &collector)?;
    Ok(collector)
}

fn gauge(registry: &Registry, series: Series) -> Result<IntGaugeVec> {
    let collector = IntGaugeVec::new(series.opts(), series.labels())
        .map_err(|source| TelemetryError::SeriesBuild { series, source })?;
    register(registry, series, &collector)?;
    Ok(collector)
}

fn register<C>(registry: &Registry, series: Series, collector: &C) -> Result<()>
where
    C: prometheus::core::Collector + Clone + 'static,
{
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::SeriesRegister { series, source })
}
