mod support;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use support::TestApp;

#[tokio::test]
async fn authors_crud_roundtrip() -> Result<()> {
    let app = TestApp::seeded()?;

    let list = app.get("/authors").await?;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(
        list.body,
        json!([{"id": 1, "name": "F. Scott Fitzgerald"}, {"id": 2, "name": "Harper Lee"}])
    );

    assert_eq!(app.get("/authors/1").await?.body["id"], json!(1));
    assert_eq!(app.get("/authors/999").await?.body, json!({}));

    let created = app.post("/authors", &json!({"name": "George Orwell"})).await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body, json!({"id": 3, "name": "George Orwell"}));

    let updated = app.put("/authors/1", &json!({"name": "Updated Name"})).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body, json!({"id": 1, "name": "Updated Name"}));

    let upserted = app.put("/authors/999", &json!({"name": "New Author"})).await?;
    assert_eq!(upserted.status, StatusCode::OK);
    assert_eq!(upserted.body, json!({"id": 999, "name": "New Author"}));

    assert_eq!(app.delete("/authors/1").await?.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/authors/1").await?.body, json!({}));
    assert_eq!(app.count("/authors").await?, 3);
    Ok(())
}

#[tokio::test]
async fn categories_crud_roundtrip() -> Result<()> {
    let app = TestApp::seeded()?;

    assert_eq!(app.count("/categories").await?, 2);
    assert_eq!(app.get("/categories/1").await?.body["name"], json!("Fiction"));
    assert_eq!(app.get("/categories/999").await?.body, json!({}));

    let created = app
        .post("/categories", &json!({"name": "Science Fiction"}))
        .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body, json!({"id": 3, "name": "Science Fiction"}));

    let updated = app
        .put("/categories/1", &json!({"name": "Updated Category"}))
        .await?;
    assert_eq!(updated.body["name"], json!("Updated Category"));

    let upserted = app
        .put("/categories/999", &json!({"name": "New Category"}))
        .await?;
    assert_eq!(upserted.body, json!({"id": 999, "name": "New Category"}));

    assert_eq!(
        app.delete("/categories/1").await?.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(app.count("/categories").await?, 3);
    Ok(())
}

#[tokio::test]
async fn name_update_with_empty_body_keeps_name() -> Result<()> {
    let app = TestApp::seeded()?;
    let reply = app.put("/authors/2", &json!({})).await?;
    assert_eq!(reply.body, json!({"id": 2, "name": "Harper Lee"}));
    let reply = app.put("/categories/2", &json!({"name": ""})).await?;
    assert_eq!(reply.body, json!({"id": 2, "name": "Classic"}));
    Ok(())
}

#[tokio::test]
async fn upsert_does_not_advance_counter() -> Result<()> {
    let app = TestApp::seeded()?;
    app.put("/categories/50", &json!({"name": "Poetry"})).await?;
    let created = app.post("/categories", &json!({"name": "Drama"})).await?;
    assert_eq!(created.body["id"], json!(3));
    Ok(())
}

#[tokio::test]
async fn creating_a_book_leaves_other_collections_untouched() -> Result<()> {
    let app = TestApp::seeded()?;
    let authors_before = app.get("/authors").await?.body;
    let categories_before = app.get("/categories").await?.body;

    app.post(
        "/books",
        &json!({"title": "New Book", "author_id": 1, "category_id": 1, "published_year": 2023}),
    )
    .await?;
    app.delete("/books/2").await?;

    assert_eq!(app.get("/authors").await?.body, authors_before);
    assert_eq!(app.get("/categories").await?.body, categories_before);
    Ok(())
}

#[tokio::test]
async fn updating_one_book_leaves_others_untouched() -> Result<()> {
    let app = TestApp::seeded()?;
    let before = app.get("/books/2").await?.body;
    app.put("/books/1", &json!({"title": "Updated"})).await?;
    assert_eq!(app.get("/books/2").await?.body, before);
    Ok(())
}

#[tokio::test]
async fn books_may_reference_missing_authors() -> Result<()> {
    let app = TestApp::seeded()?;
    let reply = app
        .post("/books", &json!({"title": "Orphan", "author_id": 42, "category_id": 77}))
        .await?;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["author_id"], json!(42));
    assert_eq!(app.get("/authors/42").await?.body, json!({}));
    Ok(())
}

#[tokio::test]
async fn reset_restores_seed_state() -> Result<()> {
    let app = TestApp::seeded()?;
    app.post("/authors", &json!({"name": "Temp"})).await?;
    app.delete("/books/1").await?;

    app.catalog.reset();

    assert_eq!(app.count("/authors").await?, 2);
    assert_eq!(app.get("/books/1").await?.body["id"], json!(1));
    let created = app.post("/authors", &json!({"name": "Again"})).await?;
    assert_eq!(created.body["id"], json!(3));
    Ok(())
}
