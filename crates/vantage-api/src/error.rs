use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use vantage_core::{CoreError, StoreError};
use vantage_discover::DiscoverError;

use crate::envelope::Envelope;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EndpointNotFound(_) | StoreError::ProbeNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            StoreError::EndpointExists(_) => ApiError::InvalidRequest(err.to_string()),
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidEndpoint(msg) => ApiError::InvalidRequest(msg),
            CoreError::Store(e) => e.into(),
        }
    }
}

impl From<DiscoverError> for ApiError {
    fn from(err: DiscoverError) -> Self {
        match err {
            DiscoverError::InvalidEndpoint(e) => e.into(),
            DiscoverError::Setup { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Envelope::<()>::error(status, self.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_model::EndpointId;

    #[test]
    fn store_errors_map_to_status() {
        let nf: ApiError = StoreError::EndpointNotFound(EndpointId(7)).into();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);

        let dup: ApiError = StoreError::EndpointExists("example.com".into()).into();
        assert_eq!(dup.status(), StatusCode::BAD_REQUEST);

        let backend: ApiError = StoreError::Backend("disk full".into()).into();
        assert_eq!(backend.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_endpoint_is_a_bad_request() {
        let err: ApiError =
            DiscoverError::InvalidEndpoint(CoreError::InvalidEndpoint("http://".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
