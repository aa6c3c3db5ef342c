use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("database connection is closed")]
    ConnectionClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: StorageError,
    },
}

impl ApiError {
    /// Wraps a storage failure with the operation it interrupted.
    pub fn storage(context: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| Self::Storage { context, source }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Storage { context, source } => {
                tracing::error!("{context}: {source:?}");
            }
            _ => tracing::warn!("rejected request with {status}: {self}"),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
