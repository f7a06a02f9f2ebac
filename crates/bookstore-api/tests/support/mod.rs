#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use bookstore_api::{ApiServer, BookstoreApp};
use bookstore_core::Catalog;
use bookstore_telemetry::Metrics;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a freshly seeded catalog plus handles for inspecting it.
pub struct TestApp {
    router: BookstoreApp,
    pub catalog: Arc<Catalog>,
    pub telemetry: Metrics,
}

/// Status and decoded body of one response; an empty body decodes to `Null`.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub raw: Vec<u8>,
    pub content_type: Option<String>,
}

impl TestApp {
    pub fn seeded() -> Result<Self> {
        let catalog = Arc::new(Catalog::seeded());
        let telemetry = Metrics::new()?;
        let router = ApiServer::new(Arc::clone(&catalog), telemetry.clone()).router();
        Ok(Self {
            router,
            catalog,
            telemetry,
        })
    }

    pub async fn request(&self, request: Request<Body>) -> Result<Reply> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let raw = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
        let body = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&raw).unwrap_or(Value::Null)
        };
        Ok(Reply {
            status,
            body,
            raw,
            content_type,
        })
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> Result<Reply> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(json)?))?,
            None => builder.body(Body::empty())?,
        };
        self.request(request).await
    }

    pub async fn get(&self, uri: &str) -> Result<Reply> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> Result<Reply> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> Result<Reply> {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<Reply> {
        self.send(Method::DELETE, uri, None).await
    }

    /// Number of elements in the array returned by `GET uri`.
    pub async fn count(&self, uri: &str) -> Result<usize> {
        Ok(self.get(uri).await?.body.as_array().map_or(0, Vec::len))
    }
}
