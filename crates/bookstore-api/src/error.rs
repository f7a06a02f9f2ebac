//! Failures of the listener lifecycle. Request handling has no error path:
//! every route answers with a success status.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result alias for API server operations.
pub type ApiServerResult<T> = std::result::Result<T, ApiServerError>;

/// Errors raised while binding or serving the bookstore listener.
#[derive(Debug, Error)]
pub enum ApiServerError {
    /// The configured address could not be bound.
    #[error("failed to bind bookstore listener on {addr}")]
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The bound socket could not report its local address.
    #[error("bookstore listener has no local address")]
    LocalAddr {
        /// Underlying IO error.
        source: io::Error,
    },
    /// The accept loop ended with an error.
    #[error("bookstore listener on {addr} stopped serving")]
    Serve {
        /// Address the listener was bound to.
        addr: SocketAddr,
        /// Underlying IO error.
        source: io::Error,
    },
}
