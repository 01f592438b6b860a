//! User persistence: the repository capability and its implementations.
//!
//! - [`InMemoryUserRepository`]: `RwLock<HashMap>` store for tests and
//!   development; assigns UUIDv7 ids.
//! - [`PgUserRepository`] (feature `postgres`): `sqlx` over a `PgPool`;
//!   Postgres assigns ids.

mod in_memory;
#[cfg(feature = "postgres")]
mod postgres;

use async_trait::async_trait;

use super::email::Email;
use super::user::{User, UserId};
use crate::error::DomainError;

pub use in_memory::InMemoryUserRepository;
#[cfg(feature = "postgres")]
pub use postgres::PgUserRepository;

/// Error type for user storage operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Another user already has this email.
    #[error("a user with email {0} already exists")]
    Duplicate(String),
    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// A stored row could not be turned back into a `User`.
    #[error("corrupt user row: {0}")]
    Corrupt(String),
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(_) => DomainError::conflict("User"),
            other => DomainError::internal_with_cause("User storage failed", other),
        }
    }
}

/// Storage capability for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id.
    ///
    /// Any id already on `user` is replaced.
    async fn save(&self, user: User) -> Result<User, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
