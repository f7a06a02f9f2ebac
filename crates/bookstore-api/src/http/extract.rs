//! Extractors that never reject a request.
//!
//! # Design
//! - Path ids go through leading-integer parsing; an id that cannot be read at
//!   all becomes not-a-number.
//! - Bodies are parsed as JSON whatever their content type; anything that is not
//!   a JSON object yields the empty field set.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use bookstore_core::{FieldSet, LooseInt, parse_leading_int};
use serde_json::Value;

/// Record id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordId(pub(crate) LooseInt);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = Path::<String>::from_request_parts(parts, state)
            .await
            .map_or(LooseInt::NotANumber, |Path(raw)| parse_leading_int(&raw));
        Ok(Self(id))
    }
}

/// Entity fields read from the request body.
#[derive(Debug)]
pub(crate) struct Fields<F>(pub(crate) F);

impl<S, F> FromRequest<S> for Fields<F>
where
    S: Send + Sync,
    F: FieldSet,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.unwrap_or_default();
        Ok(Self(fields_from_bytes(&bytes)))
    }
}

fn fields_from_bytes<F: FieldSet>(bytes: &[u8]) -> F {
    let body = serde_json::from_slice::<Value>(bytes).unwrap_or(Value::Null);
    F::from_value(&body)
}
