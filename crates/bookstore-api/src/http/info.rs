//! Root informational endpoint describing the available routes.

use axum::Json;
use bookstore_core::{Author, Book, Category, Entity};
use serde::Serialize;

const SERVICE_NAME: &str = "Bookstore Management API";
const SERVICE_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub(crate) struct RootInfo {
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
    books: EndpointSet,
    authors: EndpointSet,
    categories: EndpointSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointSet {
    get_all: String,
    get_one: String,
    create: String,
    update: String,
    delete: String,
}

impl EndpointSet {
    fn of<T: Entity>() -> Self {
        let collection = T::COLLECTION;
        Self {
            get_all: format!("GET /{collection}"),
            get_one: format!("GET /{collection}/{{id}}"),
            create: format!("POST /{collection}"),
            update: format!("PUT /{collection}/{{id}}"),
            delete: format!("DELETE /{collection}/{{id}}"),
        }
    }
}

pub(crate) fn root_info() -> RootInfo {
    RootInfo {
        message: SERVICE_NAME,
        version: SERVICE_VERSION,
        endpoints: Endpoints {
            books: EndpointSet::of::<Book>(),
            authors: EndpointSet::of::<Author>(),
            categories: EndpointSet::of::<Category>(),
        },
    }
}

pub(crate) async fn root() -> Json<RootInfo> {
    Json(root_info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_info_lists_every_collection_route() -> anyhow::Result<()> {
        let value = serde_json::to_value(root_info())?;
        assert_eq!(value["message"], json!("Bookstore Management API"));
        assert_eq!(value["version"], json!("1.0.0"));
        assert_eq!(
            value["endpoints"]["authors"],
            json!({
                "getAll": "GET /authors",
                "getOne": "GET /authors/{id}",
                "create": "POST /authors",
                "update": "PUT /authors/{id}",
                "delete": "DELETE /authors/{id}"
            })
        );
        assert_eq!(
            value["endpoints"]["categories"]["delete"],
            json!("DELETE /categories/{id}")
        );
        Ok(())
    }
}
