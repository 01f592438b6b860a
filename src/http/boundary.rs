use std::future::Future;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::DomainError;

/// Unwrap a JSON extractor result, turning a rejection into a validation
/// error so malformed bodies render like every other failure.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, DomainError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| DomainError::validation(rejection.body_text()))
}

/// Await `fut`, failing with an internal error if `timeout` elapses first.
///
/// `None` waits indefinitely.
pub async fn with_timeout<T>(
    timeout: Option<Duration>,
    fut: impl Future<Output = Result<T, DomainError>>,
) -> Result<T, DomainError> {
    let Some(limit) = timeout else {
        return fut.await;
    };
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout = ?limit, "request timed out");
            Err(DomainError::internal("Request timed out"))
        }
    }
}
