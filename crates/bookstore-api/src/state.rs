//! Shared state handed to every handler.

use std::sync::Arc;

use bookstore_core::{Author, Book, Catalog, CatalogEntity, Category, Entity, EntityStore};
use bookstore_telemetry::Metrics;

pub(crate) struct ApiState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) telemetry: Metrics,
}

impl ApiState {
    pub(crate) fn new(catalog: Arc<Catalog>, telemetry: Metrics) -> Self {
        let state = Self { catalog, telemetry };
        state.refresh_record_gauges();
        state
    }

    /// Apply `op` to `T`'s store and publish its metrics under the same lock,
    /// so the record gauge always matches the mutation that produced it.
    pub(crate) fn mutate<T, R>(
        &self,
        op: impl FnOnce(&mut EntityStore<T>) -> R,
        outcome: impl FnOnce(&R) -> &'static str,
    ) -> R
    where
        T: CatalogEntity,
    {
        self.catalog.store::<T>().mutate(|store| {
            let result = op(store);
            self.telemetry
                .inc_catalog_mutation(T::COLLECTION, outcome(&result));
            self.telemetry
                .set_catalog_records(T::COLLECTION, store.len());
            result
        })
    }

    pub(crate) fn refresh_record_gauges(&self) {
        let counts = self.catalog.counts();
        self.telemetry
            .set_catalog_records(Book::COLLECTION, counts.books);
        self.telemetry
            .set_catalog_records(Author::COLLECTION, counts.authors);
        self.telemetry
            .set_catalog_records(Category::COLLECTION, counts.categories);
    }
}
