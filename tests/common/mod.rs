//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use books_api::application::service::BookService;
use books_api::domain::model::book::CreateBookInput;
use books_api::domain::model::collection::BookCollection;
use books_api::domain::repository::BookRepository;
use books_api::infra::memory_store::InMemoryBookRepository;
use books_api::interface::http;

// =============================================================================
// FailingRepo: 常にエラーを返すリポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("backing store unavailable")]
pub struct UnavailableError;

/// 500系の経路を確認するためのリポジトリ。
pub struct FailingRepo;

impl BookRepository for FailingRepo {
    type Error = UnavailableError;

    fn read<T>(&self, _f: impl FnOnce(&BookCollection) -> T) -> Result<T, Self::Error> {
        Err(UnavailableError)
    }

    fn write<T>(&self, _f: impl FnOnce(&mut BookCollection) -> T) -> Result<T, Self::Error> {
        Err(UnavailableError)
    }
}

// =============================================================================
// Builders
// =============================================================================

/// 初期データ3件入りのService。
pub fn seeded_service() -> BookService<InMemoryBookRepository> {
    BookService::new(InMemoryBookRepository::default())
}

/// 初期データ3件入りのRouter。clone同士でStoreを共有する。
pub fn seeded_app() -> Router {
    http::router(Arc::new(seeded_service()))
}

pub fn failing_app() -> Router {
    http::router(Arc::new(BookService::new(FailingRepo)))
}

pub fn input(title: &str, author: &str) -> CreateBookInput {
    CreateBookInput::new(Some(title.into()), Some(author.into())).unwrap()
}

// =============================================================================
// HTTP helpers
// =============================================================================

/// JSONボディ付きでリクエストを送り、(status, JSON body) を返す。
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    dispatch(app, builder.body(body).unwrap()).await
}

/// 生のボディ文字列をJSONとして送る（壊れたJSON等）。
pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    send_typed(app, method, uri, "application/json", raw).await
}

/// Content-Typeを指定して生のボディを送る。
pub async fn send_typed(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: &'static str,
    raw: &'static str,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(raw))
        .unwrap();
    dispatch(app, req).await
}

async fn dispatch(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_u64().unwrap())
        .collect()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
