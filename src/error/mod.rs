//! Domain errors: the closed taxonomy every handler fails with.
//!
//! A `DomainError` is built once, at the point of failure, by one of the
//! factory functions below. It then travels unchanged inside a `Result`
//! until the boundary renders it with [`DomainError::to_body`] and
//! [`DomainError::status_code`].
//!
//! ## Example
//!
//! ```
//! use vertical_slice::{DomainError, ErrorCode};
//!
//! let err = DomainError::conflict("User");
//! assert_eq!(err.code(), ErrorCode::Conflict);
//! assert_eq!(err.status_code(), 409);
//! assert_eq!(err.message(), "User already exists");
//! ```

mod body;
mod code;

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

pub use body::ErrorBody;
pub use code::ErrorCode;

/// Field name → validation messages for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Opaque internal cause, kept for diagnostics and never rendered.
pub type Cause = Arc<dyn Error + Send + Sync>;

/// Structured failure reason returned by handlers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Input failed validation.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<FieldErrors>,
    },
    /// A resource could not be found.
    #[error("{message}")]
    NotFound { resource: String, message: String },
    /// A resource is in a conflicting state (e.g. already exists).
    #[error("{message}")]
    Conflict { resource: String, message: String },
    /// Missing or invalid credentials.
    #[error("{message}")]
    Unauthorized { message: String },
    /// Authenticated but not allowed.
    #[error("{message}")]
    Forbidden { message: String },
    /// Unexpected failure. The cause is for logs only.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl DomainError {
    /// Validation failure with a message and no field details.
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Validation failure carrying per-field messages.
    pub fn validation_fields(details: FieldErrors) -> Self {
        DomainError::Validation {
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut details = FieldErrors::new();
        details.insert(field.to_string(), vec![message.into()]);
        Self::validation_fields(details)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        DomainError::NotFound {
            message: format!("{} not found", resource),
            resource,
        }
    }

    pub fn conflict(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        DomainError::Conflict {
            message: format!("{} already exists", resource),
            resource,
        }
    }

    pub fn unauthorized() -> Self {
        DomainError::Unauthorized {
            message: "Unauthorized".to_string(),
        }
    }

    pub fn forbidden() -> Self {
        DomainError::Forbidden {
            message: "Forbidden".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
            cause: None,
        }
    }

    /// Internal failure that keeps the underlying error for diagnostics.
    pub fn internal_with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        DomainError::Internal {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Replace the default human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        match &mut self {
            DomainError::Validation { message: m, .. }
            | DomainError::NotFound { message: m, .. }
            | DomainError::Conflict { message: m, .. }
            | DomainError::Unauthorized { message: m }
            | DomainError::Forbidden { message: m }
            | DomainError::Internal { message: m, .. } => *m = message,
        }
        self
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation { .. } => ErrorCode::Validation,
            DomainError::NotFound { .. } => ErrorCode::NotFound,
            DomainError::Conflict { .. } => ErrorCode::Conflict,
            DomainError::Unauthorized { .. } => ErrorCode::Unauthorized,
            DomainError::Forbidden { .. } => ErrorCode::Forbidden,
            DomainError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation { message, .. }
            | DomainError::NotFound { message, .. }
            | DomainError::Conflict { message, .. }
            | DomainError::Unauthorized { message }
            | DomainError::Forbidden { message }
            | DomainError::Internal { message, .. } => message,
        }
    }

    /// Resource name for not-found and conflict errors.
    pub fn resource(&self) -> Option<&str> {
        match self {
            DomainError::NotFound { resource, .. } | DomainError::Conflict { resource, .. } => {
                Some(resource)
            }
            _ => None,
        }
    }

    /// Field-level details; only validation errors carry them.
    pub fn details(&self) -> Option<&FieldErrors> {
        match self {
            DomainError::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }

    /// Render the externally visible payload.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.message().to_string(),
            details: self.details().cloned(),
        }
    }
}
