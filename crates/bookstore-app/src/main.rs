#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that serves the bookstore inventory API.
//!
//! Failures are written to stderr before exiting non-zero, since configuration
//! errors surface before the tracing subscriber exists.

use std::process::ExitCode;

use bookstore_app::run_app;

#[tokio::main]
async fn main() -> ExitCode {
    match run_app().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookstore: {}", err.report());
            ExitCode::FAILURE
        }
    }
}
