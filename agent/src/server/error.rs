//! Mapping from domain faults to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dockhand_common::IdentifierError;
use thiserror::Error;

use crate::domain::{LifecycleFault, StorageError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// DecodeFault: the body is not the expected JSON object.
    #[error("Couldn't understand the JSON body: {0}")]
    Decode(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleFault),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Lifecycle(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

/// Decode a JSON body without touching any other state.
pub fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))
}
