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

//! Process-local inventory for books, authors, and categories.
//!
//! Layout: `numeric.rs` (lenient integer coercion and truthiness), `model.rs`
//! (records and field sets), `store.rs` (`EntityStore` and its contract),
//! `catalog.rs` (the three stores behind locks), `seed.rs` (start-up records).

pub mod catalog;
pub mod model;
pub mod numeric;
pub mod seed;
pub mod store;

pub use catalog::{Catalog, CatalogEntity, CollectionCounts, StoreHandle};
pub use model::{Author, Book, BookFields, Category, NameFields};
pub use numeric::{LooseInt, coerce_int, is_truthy, number_text, parse_leading_int};
pub use store::{Entity, EntityStore, FieldSet, Lookup, Upserted};
