//! Ordered, auto-incrementing record store shared by every entity kind.
//!
//! # Design
//! - Records keep insertion order; `list_all` returns them in that order.
//! - `next_id` only advances through `create`; explicit-id upserts leave it untouched.
//! - Missing records are a successful [`Lookup::Empty`], never an error.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::numeric::LooseInt;

/// Field set extracted from a request body.
pub trait FieldSet: Sized {
    /// Pull the known keys out of a JSON object, ignoring everything else.
    fn from_object(body: &Map<String, Value>) -> Self;

    /// Extract from any JSON value; non-objects yield the empty field set.
    fn from_value(body: &Value) -> Self {
        body.as_object()
            .map_or_else(|| Self::from_object(&Map::new()), Self::from_object)
    }
}

/// Record kind that can live in an [`EntityStore`].
pub trait Entity: Clone + Serialize + Send + 'static {
    /// Body fields accepted by create and upsert.
    type Fields: FieldSet + Send;

    /// Collection name used in routes, logs, and metrics labels.
    const COLLECTION: &'static str;

    /// Identifier of this record.
    fn id(&self) -> LooseInt;

    /// Build a fresh record from exactly the supplied fields.
    fn from_fields(id: LooseInt, fields: Self::Fields) -> Self;

    /// Overwrite the fields whose raw input is truthy; leave the rest unchanged.
    fn merge(&mut self, fields: Self::Fields);
}

/// Result of a lookup by id: the record, or the empty-object sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// A record with the requested id exists.
    Found(T),
    /// No record matched; serialises as `{}`.
    Empty,
}

impl<T> Lookup<T> {
    /// Whether a record was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Self::Found)
    }
}

impl<T: Serialize> Serialize for Lookup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(record) => record.serialize(serializer),
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Outcome of an upsert by explicit id.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<T> {
    /// No record had the id; a new one was appended with exactly that id.
    Created(T),
    /// An existing record was merged in place.
    Updated(T),
}

impl<T> Upserted<T> {
    /// Borrow the resulting record.
    #[must_use]
    pub const fn record(&self) -> &T {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }

    /// Take the resulting record.
    #[must_use]
    pub fn into_record(self) -> T {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }

    /// Label describing which branch was taken.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
        }
    }
}

/// Insertion-ordered collection of one entity kind with a next-id counter.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    records: Vec<T>,
    next_id: i64,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Build a store holding `records` whose counter starts at `next_id`.
    #[must_use]
    pub const fn seeded(records: Vec<T>, next_id: i64) -> Self {
        Self { records, next_id }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[T] {
        &self.records
    }

    /// First record whose id equals `id`, or the empty sentinel.
    #[must_use]
    pub fn get_by_id(&self, id: LooseInt) -> Lookup<T> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .into()
    }

    /// Append a record under the next counter value and advance the counter.
    ///
    /// The counter is used as-is even when an explicit-id upsert already
    /// claimed that value.
    pub fn create(&mut self, fields: T::Fields) -> T {
        let id = LooseInt::Int(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let record = T::from_fields(id, fields);
        self.records.push(record.clone());
        record
    }

    /// Merge into the record with `id`, or append a new record carrying exactly `id`.
    ///
    /// Never advances the counter. A not-a-number id matches nothing, so it
    /// always appends.
    pub fn upsert_by_id(&mut self, id: LooseInt, fields: T::Fields) -> Upserted<T> {
        if let Some(existing) = self.records.iter_mut().find(|record| record.id() == id) {
            existing.merge(fields);
            return Upserted::Updated(existing.clone());
        }
        let record = T::from_fields(id, fields);
        self.records.push(record.clone());
        Upserted::Created(record)
    }

    /// Remove every record whose id equals `id`; returns how many were removed.
    pub fn delete_by_id(&mut self, id: LooseInt) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        before - self.records.len()
    }

    /// Value the next `create` will assign.
    #[must_use]
    pub const fn next_id(&self) -> i64 {
        self.next_id
    }

    /// Number of records held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
