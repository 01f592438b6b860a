use std::error::Error;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::DomainError;

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let DomainError::Internal { message, cause } = &self {
            match cause {
                Some(cause) => tracing::error!(%message, cause = %cause, source = ?cause.source(), "internal error"),
                None => tracing::error!(%message, "internal error"),
            }
        }

        (status, Json(self.to_body())).into_response()
    }
}

/// `201 Created` with a JSON body.
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
