//! The three inventory stores behind per-store locks.
//!
//! # Design
//! - One owner (`Catalog`) replaces process-wide mutable collections; callers
//!   receive it explicitly and tests build their own.
//! - Each store has its own mutex so a mutation never interleaves with another
//!   on the same collection, while collections stay independent.
//! - A lock is held for exactly one store operation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::model::{Author, Book, Category};
use crate::numeric::LooseInt;
use crate::seed::{seed_authors, seed_books, seed_categories};
use crate::store::{Entity, EntityStore, Lookup, Upserted};

/// Owner of the book, author, and category stores.
#[derive(Debug)]
pub struct Catalog {
    books: Mutex<EntityStore<Book>>,
    authors: Mutex<EntityStore<Author>>,
    categories: Mutex<EntityStore<Category>>,
}

/// Record count per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    /// Number of books.
    pub books: usize,
    /// Number of authors.
    pub authors: usize,
    /// Number of categories.
    pub categories: usize,
}

impl Catalog {
    /// Catalog holding the start-up seed records.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            books: Mutex::new(seed_books()),
            authors: Mutex::new(seed_authors()),
            categories: Mutex::new(seed_categories()),
        }
    }

    /// Catalog with empty stores whose counters start at 1.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            books: Mutex::new(EntityStore::default()),
            authors: Mutex::new(EntityStore::default()),
            categories: Mutex::new(EntityStore::default()),
        }
    }

    /// Restore every store and counter to the seed state.
    pub fn reset(&self) {
        *lock(&self.books) = seed_books();
        *lock(&self.authors) = seed_authors();
        *lock(&self.categories) = seed_categories();
    }

    /// Handle to the store for entity kind `T`.
    #[must_use]
    pub fn store<T: CatalogEntity>(&self) -> StoreHandle<'_, T> {
        T::handle(self)
    }

    /// Handle to the book store.
    #[must_use]
    pub const fn books(&self) -> StoreHandle<'_, Book> {
        StoreHandle { store: &self.books }
    }

    /// Handle to the author store.
    #[must_use]
    pub const fn authors(&self) -> StoreHandle<'_, Author> {
        StoreHandle {
            store: &self.authors,
        }
    }

    /// Handle to the category store.
    #[must_use]
    pub const fn categories(&self) -> StoreHandle<'_, Category> {
        StoreHandle {
            store: &self.categories,
        }
    }

    /// Current record count of every collection.
    #[must_use]
    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            books: self.books().len(),
            authors: self.authors().len(),
            categories: self.categories().len(),
        }
    }
}

/// Entity kinds that have a store in the [`Catalog`].
pub trait CatalogEntity: Entity {
    /// Select this kind's store.
    fn handle(catalog: &Catalog) -> StoreHandle<'_, Self>;
}

impl CatalogEntity for Book {
    fn handle(catalog: &Catalog) -> StoreHandle<'_, Self> {
        catalog.books()
    }
}

impl CatalogEntity for Author {
    fn handle(catalog: &Catalog) -> StoreHandle<'_, Self> {
        catalog.authors()
    }
}

impl CatalogEntity for Category {
    fn handle(catalog: &Catalog) -> StoreHandle<'_, Self> {
        catalog.categories()
    }
}

/// Borrowed access to one store; every call locks for a single operation.
#[derive(Debug)]
pub struct StoreHandle<'a, T> {
    store: &'a Mutex<EntityStore<T>>,
}

impl<T: Entity> StoreHandle<'_, T> {
    /// Snapshot of all records in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<T> {
        lock(self.store).list_all().to_vec()
    }

    /// See [`EntityStore::get_by_id`].
    #[must_use]
    pub fn get_by_id(&self, id: LooseInt) -> Lookup<T> {
        lock(self.store).get_by_id(id)
    }

    /// See [`EntityStore::create`].
    pub fn create(&self, fields: T::Fields) -> T {
        lock(self.store).create(fields)
    }

    /// See [`EntityStore::upsert_by_id`].
    pub fn upsert_by_id(&self, id: LooseInt, fields: T::Fields) -> Upserted<T> {
        lock(self.store).upsert_by_id(id, fields)
    }

    /// See [`EntityStore::delete_by_id`].
    pub fn delete_by_id(&self, id: LooseInt) -> usize {
        lock(self.store).delete_by_id(id)
    }

    /// Run `op` against the store under a single lock acquisition.
    ///
    /// Anything `op` observes, such as the record count after a mutation, is
    /// consistent with the mutation it just applied.
    pub fn mutate<R>(&self, op: impl FnOnce(&mut EntityStore<T>) -> R) -> R {
        op(&mut lock(self.store))
    }

    /// Value the next `create` will assign.
    #[must_use]
    pub fn next_id(&self) -> i64 {
        lock(self.store).next_id()
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(self.store).len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(self.store).is_empty()
    }
}

// Every store operation is a single in-memory step, so a poisoned lock still
// guards a consistent store.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
