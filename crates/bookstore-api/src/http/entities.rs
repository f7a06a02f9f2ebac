//! Handler family shared by books, authors, and categories.
//!
//! Each handler is generic over the entity kind; the router instantiates the
//! family once per collection.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use bookstore_core::{CatalogEntity, LooseInt, Lookup, Upserted};
use bookstore_telemetry::{RequestContext, current_request};
use tracing::{debug, info};

use crate::http::extract::{Fields, RecordId};
use crate::state::ApiState;

pub(crate) async fn list<T: CatalogEntity>(State(state): State<Arc<ApiState>>) -> Json<Vec<T>> {
    let records = state.catalog.store::<T>().list_all();
    debug!(
        collection = T::COLLECTION,
        count = records.len(),
        "listed records"
    );
    Json(records)
}

pub(crate) async fn get_one<T: CatalogEntity>(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Json<Lookup<T>> {
    let lookup = state.catalog.store::<T>().get_by_id(id);
    debug!(
        collection = T::COLLECTION,
        id = %id,
        found = lookup.is_found(),
        "looked up record"
    );
    Json(lookup)
}

pub(crate) async fn create<T: CatalogEntity>(
    State(state): State<Arc<ApiState>>,
    Fields(fields): Fields<T::Fields>,
) -> (StatusCode, Json<T>) {
    let record = state.mutate::<T, _>(|store| store.create(fields), |_| "created");
    log_mutation::<T>(record.id(), "created");
    (StatusCode::CREATED, Json(record))
}

pub(crate) async fn upsert<T: CatalogEntity>(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
    Fields(fields): Fields<T::Fields>,
) -> Json<T> {
    let upserted = state.mutate::<T, _>(
        |store| store.upsert_by_id(id, fields),
        Upserted::outcome,
    );
    log_mutation::<T>(id, upserted.outcome());
    Json(upserted.into_record())
}

pub(crate) async fn remove<T: CatalogEntity>(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> StatusCode {
    let removed = state.mutate::<T, _>(
        |store| store.delete_by_id(id),
        |removed: &usize| delete_outcome(*removed),
    );
    log_mutation::<T>(id, delete_outcome(removed));
    StatusCode::NO_CONTENT
}

const fn delete_outcome(removed: usize) -> &'static str {
    if removed == 0 { "noop" } else { "deleted" }
}

fn log_mutation<T: CatalogEntity>(id: LooseInt, outcome: &'static str) {
    let request = current_request();
    let request = request.as_ref();
    info!(
        collection = T::COLLECTION,
        id = %id,
        outcome,
        route = request.map_or("", RequestContext::route),
        request_id = request.map_or("", RequestContext::request_id),
        "record mutated"
    );
}
