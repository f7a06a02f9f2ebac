//! Record types for the three inventory collections and their body field sets.
//!
//! Text fields are kept verbatim as the JSON value supplied by the client. Numeric
//! fields go through [`coerce_int`] so malformed input is stored as not-a-number
//! instead of being rejected. References between entities are never checked.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::numeric::{LooseInt, coerce_int, is_truthy};
use crate::store::{Entity, FieldSet};

/// A book in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    /// Record identifier.
    pub id: LooseInt,
    /// Title as supplied; omitted from output when never provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Author reference (not checked against the author collection).
    pub author_id: LooseInt,
    /// Category reference (not checked against the category collection).
    pub category_id: LooseInt,
    /// Year of publication.
    pub published_year: LooseInt,
}

impl Book {
    /// Construct a fully populated book.
    #[must_use]
    pub fn new(
        id: i64,
        title: &str,
        author_id: i64,
        category_id: i64,
        published_year: i64,
    ) -> Self {
        Self {
            id: LooseInt::Int(id),
            title: Some(Value::from(title)),
            author_id: LooseInt::Int(author_id),
            category_id: LooseInt::Int(category_id),
            published_year: LooseInt::Int(published_year),
        }
    }
}

/// Raw book fields read from a request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFields {
    /// Raw `title` value.
    pub title: Option<Value>,
    /// Raw `author_id` value.
    pub author_id: Option<Value>,
    /// Raw `category_id` value.
    pub category_id: Option<Value>,
    /// Raw `published_year` value.
    pub published_year: Option<Value>,
}

impl FieldSet for BookFields {
    fn from_object(body: &Map<String, Value>) -> Self {
        Self {
            title: body.get("title").cloned(),
            author_id: body.get("author_id").cloned(),
            category_id: body.get("category_id").cloned(),
            published_year: body.get("published_year").cloned(),
        }
    }
}

impl Entity for Book {
    type Fields = BookFields;

    const COLLECTION: &'static str = "books";

    fn id(&self) -> LooseInt {
        self.id
    }

    fn from_fields(id: LooseInt, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author_id: coerce_int(fields.author_id.as_ref()),
            category_id: coerce_int(fields.category_id.as_ref()),
            published_year: coerce_int(fields.published_year.as_ref()),
        }
    }

    fn merge(&mut self, fields: BookFields) {
        overwrite_text(&mut self.title, fields.title);
        overwrite_int(&mut self.author_id, fields.author_id.as_ref());
        overwrite_int(&mut self.category_id, fields.category_id.as_ref());
        overwrite_int(&mut self.published_year, fields.published_year.as_ref());
    }
}

/// An author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    /// Record identifier.
    pub id: LooseInt,
    /// Display name as supplied; omitted from output when never provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

impl Author {
    /// Construct a named author.
    #[must_use]
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: LooseInt::Int(id),
            name: Some(Value::from(name)),
        }
    }
}

/// A book category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Record identifier.
    pub id: LooseInt,
    /// Display name as supplied; omitted from output when never provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

impl Category {
    /// Construct a named category.
    #[must_use]
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: LooseInt::Int(id),
            name: Some(Value::from(name)),
        }
    }
}

/// Raw `name` field shared by authors and categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameFields {
    /// Raw `name` value.
    pub name: Option<Value>,
}

impl FieldSet for NameFields {
    fn from_object(body: &Map<String, Value>) -> Self {
        Self {
            name: body.get("name").cloned(),
        }
    }
}

impl Entity for Author {
    type Fields = NameFields;

    const COLLECTION: &'static str = "authors";

    fn id(&self) -> LooseInt {
        self.id
    }

    fn from_fields(id: LooseInt, fields: NameFields) -> Self {
        Self {
            id,
            name: fields.name,
        }
    }

    fn merge(&mut self, fields: NameFields) {
        overwrite_text(&mut self.name, fields.name);
    }
}

impl Entity for Category {
    type Fields = NameFields;

    const COLLECTION: &'static str = "categories";

    fn id(&self) -> LooseInt {
        self.id
    }

    fn from_fields(id: LooseInt, fields: NameFields) -> Self {
        Self {
            id,
            name: fields.name,
        }
    }

    fn merge(&mut self, fields: NameFields) {
        overwrite_text(&mut self.name, fields.name);
    }
}

fn overwrite_text(slot: &mut Option<Value>, input: Option<Value>) {
    if is_truthy(input.as_ref()) {
        *slot = input;
    }
}

fn overwrite_int(slot: &mut LooseInt, input: Option<&Value>) {
    if is_truthy(input) {
        *slot = coerce_int(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book_fields(body: &Value) -> BookFields {
        BookFields::from_value(body)
    }

    #[test]
    fn from_fields_keeps_absent_fields_absent() -> Result<(), serde_json::Error> {
        let book = Book::from_fields(LooseInt::Int(3), book_fields(&json!({"title": "Incomplete"})));
        assert_eq!(book.title, Some(json!("Incomplete")));
        assert!(book.author_id.is_nan());
        assert_eq!(
            serde_json::to_value(&book)?,
            json!({
                "id": 3,
                "title": "Incomplete",
                "author_id": null,
                "category_id": null,
                "published_year": null
            })
        );

        let nameless = Author::from_fields(LooseInt::Int(4), NameFields::default());
        assert_eq!(serde_json::to_value(&nameless)?, json!({"id": 4}));
        Ok(())
    }

    #[test]
    fn from_fields_coerces_numeric_strings() {
        let book = Book::from_fields(
            LooseInt::Int(3),
            book_fields(&json!({
                "title": "1984",
                "author_id": "1",
                "category_id": 2.9,
                "published_year": "1949 AD"
            })),
        );
        assert_eq!(book.author_id, LooseInt::Int(1));
        assert_eq!(book.category_id, LooseInt::Int(2));
        assert_eq!(book.published_year, LooseInt::Int(1949));
    }

    #[test]
    fn merge_is_gated_on_truthiness() {
        let mut book = Book::new(1, "The Great Gatsby", 1, 1, 1925);
        book.merge(book_fields(&json!({
            "title": "",
            "author_id": 0,
            "category_id": "7",
            "published_year": null
        })));
        assert_eq!(book, Book::new(1, "The Great Gatsby", 1, 7, 1925));

        book.merge(book_fields(&json!({"published_year": "abc"})));
        assert!(book.published_year.is_nan());
    }

    #[test]
    fn merge_replaces_truthy_name() {
        let mut author = Author::new(1, "F. Scott Fitzgerald");
        author.merge(NameFields::from_value(&json!({})));
        assert_eq!(author.name, Some(json!("F. Scott Fitzgerald")));
        author.merge(NameFields::from_value(&json!({"name": "Updated Name"})));
        assert_eq!(author.name, Some(json!("Updated Name")));

        let mut category = Category::new(1, "Fiction");
        category.merge(NameFields::from_value(&json!({"name": false})));
        assert_eq!(category.name, Some(json!("Fiction")));
    }

    #[test]
    fn non_object_bodies_yield_empty_field_sets() {
        assert_eq!(book_fields(&json!([1, 2, 3])), BookFields::default());
        assert_eq!(NameFields::from_value(&json!("name")), NameFields::default());
    }

    #[test]
    fn explicit_null_text_is_kept_on_create() -> Result<(), serde_json::Error> {
        let category = Category::from_fields(LooseInt::Int(3), NameFields::from_value(&json!({"name": null})));
        assert_eq!(serde_json::to_value(&category)?, json!({"id": 3, "name": null}));
        Ok(())
    }
}
