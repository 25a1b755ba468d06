//! books-api の HTTP Server
//!
//! HTTP/JSON <-> application::BookService
//!
//! ルート: `GET /`、`GET|POST /books`、`GET|PUT|DELETE /books/{id}`（末尾スラッシュ可）。
//! それ以外は全て `Route not found` Envelopeで返す。

use std::any::Any;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::application::error::AppError;
use crate::application::service::BookService;
use crate::domain::error::DomainError;
use crate::domain::model::book::{Book, CreateBookInput, UpdateBookInput};
use crate::domain::model::id::BookId;
use crate::domain::repository::BookRepository;
use crate::infra::memory_store::InMemoryBookRepository;

use super::config::ServerConfig;

// =============================================================================
// Public entry point
// =============================================================================

/// HTTP Serverを起動する。Storeは初期データ入りで1度だけ構築する。
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let service = Arc::new(BookService::new(InMemoryBookRepository::default()));
    let app = router(service);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Books REST API Server running on http://{addr}");
    tracing::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

/// Routerを組み立てる。テストからはRepositoryを差し替えて使う。
pub fn router<R>(service: Arc<BookService<R>>) -> Router
where
    R: BookRepository + Send + Sync + 'static,
{
    let books = get(list_books::<R>)
        .post(create_book::<R>)
        .fallback(route_not_found);
    let book = get(get_book::<R>)
        .put(update_book::<R>)
        .delete(delete_book::<R>)
        .fallback(route_not_found);

    // 末尾スラッシュ1つは同じルートとして扱う
    Router::new()
        .route("/", get(root).fallback(route_not_found))
        .route("/books", books.clone())
        .route("/books/", books)
        .route("/books/{id}", book.clone())
        .route("/books/{id}/", book)
        .fallback(route_not_found)
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// 成功時のレスポンス `{success, count?, message?, data}`。
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> Envelope<T> {
    fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data,
        }
    }

    fn with_message(message: &'static str, data: T) -> Self {
        Self {
            message: Some(message),
            ..Self::data(data)
        }
    }
}

/// 失敗時のレスポンス `{success:false, message, path?, error?}`。
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Endpoints {
    get_all_books: &'static str,
    get_book_by_id: &'static str,
    create_book: &'static str,
    update_book: &'static str,
    delete_book: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiDescription {
    message: &'static str,
    endpoints: Endpoints,
}

// =============================================================================
// Errors
// =============================================================================

/// HTTP境界のエラー。全てJSON Envelopeとして返す。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// パスのID文字列をそのまま保持する（数値でない場合もメッセージに出す）
    #[error("Book with ID {0} not found")]
    BookNotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Route not found")]
    RouteNotFound(String),

    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BookNotFound(_) | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Domain(DomainError::BookNotFound(id)) => Self::BookNotFound(id.to_string()),
            AppError::Domain(DomainError::InvalidInput(msg)) => Self::InvalidInput(msg),
            e @ AppError::Storage(_) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let (path, error) = match self {
            Self::RouteNotFound(path) => (Some(path), None),
            Self::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (None, Some(detail))
            }
            other => {
                tracing::debug!("request rejected: {other}");
                (None, None)
            }
        };
        let body = ErrorEnvelope {
            success: false,
            message,
            path,
            error,
        };
        (status, Json(body)).into_response()
    }
}

/// handler内のpanicを500 Envelopeに変換する。
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}

// =============================================================================
// Request parsing
// =============================================================================

/// POST / PUT のリクエストボディ。`id` など未知のフィールドは無視する。
#[derive(Debug, Default, Deserialize)]
struct BookPayload {
    title: Option<String>,
    author: Option<String>,
}

/// Content-Typeが `application/json` のときだけボディを読む。
/// それ以外、または空ボディは `{}` とみなす。
///
/// JSON構文エラーは500、型の不一致（titleが数値など）は400。
fn parse_payload(headers: &HeaderMap, body: &Bytes) -> Result<BookPayload, ApiError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BookPayload::default());
    }
    serde_json::from_slice(body).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => {
            ApiError::InvalidInput(format!("Invalid JSON body: {e}"))
        }
        _ => ApiError::Internal(e.to_string()),
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// 先頭の数字列だけを読む（`1abc` は 1、`abc` はどれにも一致しない）。
/// 0・負数・桁あふれもどのBookにも一致しない。
fn parse_id(raw: &str) -> Result<BookId, ApiError> {
    let s = raw.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(ApiError::BookNotFound(raw.to_string()));
    }

    match digits.parse::<u64>() {
        Ok(n) if n > 0 && !negative => Ok(BookId::new(n)),
        Ok(n) if negative && n > 0 => Err(ApiError::BookNotFound(format!("-{n}"))),
        Ok(n) => Err(ApiError::BookNotFound(n.to_string())),
        Err(_) => Err(ApiError::BookNotFound(raw.to_string())),
    }
}

/// パスの `{id}` セグメント。抽出失敗もJSON Envelopeで返す。
struct BookIdParam(BookId);

impl<S: Send + Sync> FromRequestParts<S> for BookIdParam {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 不正なパーセントエンコード（非UTF-8）は内部エラー扱い
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
        parse_id(&raw).map(Self)
    }
}

// =============================================================================
// Handlers
// =============================================================================

type Shared<R> = State<Arc<BookService<R>>>;

async fn root() -> Json<ApiDescription> {
    Json(ApiDescription {
        message: "Welcome to Books REST API",
        endpoints: Endpoints {
            get_all_books: "GET /books",
            get_book_by_id: "GET /books/:id",
            create_book: "POST /books",
            update_book: "PUT /books/:id",
            delete_book: "DELETE /books/:id",
        },
    })
}

async fn list_books<R: BookRepository>(
    State(svc): Shared<R>,
) -> Result<Json<Envelope<Vec<Book>>>, ApiError> {
    let books = svc.list_books()?;
    let count = books.len();
    Ok(Json(Envelope {
        count: Some(count),
        ..Envelope::data(books)
    }))
}

async fn get_book<R: BookRepository>(
    State(svc): Shared<R>,
    BookIdParam(id): BookIdParam,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let book = svc.get_book(id)?;
    Ok(Json(Envelope::data(book)))
}

async fn create_book<R: BookRepository>(
    State(svc): Shared<R>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Book>>), ApiError> {
    let payload = parse_payload(&headers, &body)?;
    let input = CreateBookInput::new(payload.title, payload.author).map_err(AppError::from)?;
    let book = svc.create_book(input)?;
    tracing::info!(id = %book.id(), title = book.title(), "book created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Book created successfully", book)),
    ))
}

async fn update_book<R: BookRepository>(
    State(svc): Shared<R>,
    BookIdParam(id): BookIdParam,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let payload = parse_payload(&headers, &body)?;
    let book = svc.update_book(id, UpdateBookInput::new(payload.title, payload.author))?;
    tracing::info!(id = %book.id(), "book updated");
    Ok(Json(Envelope::with_message("Book updated successfully", book)))
}

async fn delete_book<R: BookRepository>(
    State(svc): Shared<R>,
    BookIdParam(id): BookIdParam,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let book = svc.delete_book(id)?;
    tracing::info!(id = %book.id(), "book deleted");
    Ok(Json(Envelope::with_message("Book deleted successfully", book)))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
