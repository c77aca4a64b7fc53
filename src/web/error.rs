//! HTTP-facing error type.
//!
//! Store and infrastructure code returns `anyhow::Result`; at the handler
//! boundary everything funnels into [`WebError`], which knows how to turn
//! itself into a response.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    /// Request targeted a content row that does not exist.
    #[error("not found")]
    NotFound,

    /// A required form field was missing or unreadable.
    #[error("invalid form data: {0}")]
    Validation(String),

    /// Database, filesystem or template failure. Logged, shown as a generic
    /// 500 page.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<askama::Error> for WebError {
    fn from(e: askama::Error) -> Self {
        WebError::Internal(e.into())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => (
                StatusCode::NOT_FOUND,
                Html("<h1>404</h1><p>Sayfa bulunamadı.</p>".to_string()),
            )
                .into_response(),
            WebError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(format!("<h1>422</h1><p>{msg}</p>")),
            )
                .into_response(),
            WebError::Internal(e) => {
                error!("Internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>500</h1><p>Bir hata oluştu.</p>".to_string()),
                )
                    .into_response()
            }
        }
    }
}
