//! Records installed at start-up and on reset.

use crate::model::{Author, Book, Category};
use crate::store::EntityStore;

/// Counter value every seeded collection starts from.
pub const SEED_NEXT_ID: i64 = 3;

/// Seeded book collection.
#[must_use]
pub fn seed_books() -> EntityStore<Book> {
    EntityStore::seeded(
        vec![
            Book::new(1, "The Great Gatsby", 1, 1, 1925),
            Book::new(2, "To Kill a Mockingbird", 2, 2, 1960),
        ],
        SEED_NEXT_ID,
    )
}

/// Seeded author collection.
#[must_use]
pub fn seed_authors() -> EntityStore<Author> {
    EntityStore::seeded(
        vec![
            Author::new(1, "F. Scott Fitzgerald"),
            Author::new(2, "Harper Lee"),
        ],
        SEED_NEXT_ID,
    )
}

/// Seeded category collection.
#[must_use]
pub fn seed_categories() -> EntityStore<Category> {
    EntityStore::seeded(
        vec![Category::new(1, "Fiction"), Category::new(2, "Classic")],
        SEED_NEXT_ID,
    )
}
