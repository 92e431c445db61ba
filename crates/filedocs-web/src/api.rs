//! REST API route handlers.
//!
//! Provides endpoints for readiness, directory management, and document
//! read/create/update. Successful mutations answer with the plain text
//! `ok`; store errors are mapped by [`ApiError`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use filedocs_store::{DirIndex, StoreError, title};

use crate::state::AppState;

/// Body returned by every successful mutation.
pub const OK: &str = "ok";

/// Body returned by the readiness probe.
pub const READY: &str = "Server is ready!";

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// A store error on its way out as an HTTP response.
///
/// Client errors become `400` with the error's message as a text body.
/// Storage failures become `500`; their detail is logged, not returned.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            tracing::debug!(error = %self.0, "rejected request");
            (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
        } else {
            tracing::error!(error = %self.0, "store operation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// GET /api
// ---------------------------------------------------------------------------

/// Readiness probe.
pub async fn ready() -> &'static str {
    READY
}

// ---------------------------------------------------------------------------
// Directories
// ---------------------------------------------------------------------------

/// GET /api/dirs — The full index: directory title to document titles.
pub async fn list_dirs(State(state): State<Arc<AppState>>) -> Json<DirIndex> {
    let store = state.store.lock().await;
    Json(store.index().clone())
}

/// POST /api/dirs — Create a directory from `{title}`.
pub async fn create_dir(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<&'static str, ApiError> {
    let dir = title::title_from_body(&body)?;
    state.store.lock().await.create_dir(dir).await?;
    Ok(OK)
}

/// PUT /api/dirs/{dir} — Rename a directory to `{title}`.
pub async fn rename_dir(
    State(state): State<Arc<AppState>>,
    Path(dir): Path<String>,
    Json(body): Json<Value>,
) -> Result<&'static str, ApiError> {
    let new_dir = title::title_from_body(&body)?;
    state.store.lock().await.rename_dir(&dir, new_dir).await?;
    Ok(OK)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// GET /api/dirs/{dir}/docs/{doc} — The stored JSON of a document.
pub async fn read_doc(
    State(state): State<Arc<AppState>>,
    Path((dir, doc)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let body = state.store.lock().await.read_doc(&dir, &doc).await?;
    Ok(Json(body))
}

/// POST /api/dirs/{dir}/docs — Store the request body as a new document.
pub async fn create_doc(
    State(state): State<Arc<AppState>>,
    Path(dir): Path<String>,
    Json(body): Json<Value>,
) -> Result<&'static str, ApiError> {
    state.store.lock().await.create_doc(&dir, &body).await?;
    Ok(OK)
}

/// PUT /api/dirs/{dir}/docs/{doc} — Overwrite (and possibly rename) a document.
pub async fn update_doc(
    State(state): State<Arc<AppState>>,
    Path((dir, doc)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<&'static str, ApiError> {
    state
        .store
        .lock()
        .await
        .update_doc(&dir, &doc, &body)
        .await?;
    Ok(OK)
}
