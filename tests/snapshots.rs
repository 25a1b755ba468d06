//! Snapshot tests: response envelope regression detection.

mod common;

use axum::http::Method;
use insta::assert_json_snapshot;
use serde_json::json;

use common::{failing_app, seeded_app, send};

// =============================================================================
// Success envelopes
// =============================================================================

#[tokio::test]
async fn snapshot_root() {
    let (_, body) = send(&seeded_app(), Method::GET, "/", None).await;
    assert_json_snapshot!(body, @r#"
    {
      "endpoints": {
        "createBook": "POST /books",
        "deleteBook": "DELETE /books/:id",
        "getAllBooks": "GET /books",
        "getBookById": "GET /books/:id",
        "updateBook": "PUT /books/:id"
      },
      "message": "Welcome to Books REST API"
    }
    "#);
}

#[tokio::test]
async fn snapshot_list_seed() {
    let (_, body) = send(&seeded_app(), Method::GET, "/books", None).await;
    assert_json_snapshot!(body, @r#"
    {
      "count": 3,
      "data": [
        {
          "author": "F. Scott Fitzgerald",
          "id": 1,
          "title": "The Great Gatsby"
        },
        {
          "author": "Harper Lee",
          "id": 2,
          "title": "To Kill a Mockingbird"
        },
        {
          "author": "George Orwell",
          "id": 3,
          "title": "1984"
        }
      ],
      "success": true
    }
    "#);
}

#[tokio::test]
async fn snapshot_create() {
    let (_, body) = send(
        &seeded_app(),
        Method::POST,
        "/books",
        Some(json!({"title": "Dune", "author": "Frank Herbert"})),
    )
    .await;
    assert_json_snapshot!(body, @r#"
    {
      "data": {
        "author": "Frank Herbert",
        "id": 4,
        "title": "Dune"
      },
      "message": "Book created successfully",
      "success": true
    }
    "#);
}

// =============================================================================
// Error envelopes
// =============================================================================

#[tokio::test]
async fn snapshot_not_found() {
    let (_, body) = send(&seeded_app(), Method::DELETE, "/books/10", None).await;
    assert_json_snapshot!(body, @r#"
    {
      "message": "Book with ID 10 not found",
      "success": false
    }
    "#);
}

#[tokio::test]
async fn snapshot_route_not_found() {
    let (_, body) = send(&seeded_app(), Method::GET, "/books/1/reviews", None).await;
    assert_json_snapshot!(body, @r#"
    {
      "message": "Route not found",
      "path": "/books/1/reviews",
      "success": false
    }
    "#);
}

#[tokio::test]
async fn snapshot_internal_error() {
    let (_, body) = send(&failing_app(), Method::DELETE, "/books/1", None).await;
    assert_json_snapshot!(body, @r#"
    {
      "error": "storage error: backing store unavailable",
      "message": "Internal Server Error",
      "success": false
    }
    "#);
}
