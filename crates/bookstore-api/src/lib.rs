//! HTTP surface for the bookstore inventory.
//!
//! Every collection exposes the same five routes; missing records and
//! malformed ids are answered with success statuses rather than errors.

pub mod error;
pub mod http;
pub(crate) mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::{ApiServer, BookstoreApp};
