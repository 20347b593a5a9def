//! Error-to-status translation. The HTTP layer is the only place where
//! core errors become transport codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use caixa_core::accounts::AccountError;
use caixa_core::errors::Error;
use caixa_core::transfers::TransferError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

/// Shorthand for a 400 built from a plain message.
pub fn invalid(message: impl Into<String>) -> ApiError {
    ApiError(Error::Validation(
        caixa_core::errors::ValidationError::InvalidInput(message.into()),
    ))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Transfer(
                TransferError::OriginAccountNotFound(_)
                | TransferError::DestinationAccountNotFound(_),
            ) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Category(_) => StatusCode::BAD_REQUEST,
            Error::Account(AccountError::HasTransactions { .. }) => StatusCode::BAD_REQUEST,
            Error::Account(AccountError::DefaultCategoryMissing { .. }) => StatusCode::BAD_REQUEST,
            Error::Fx(_) | Error::Database(_) | Error::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
