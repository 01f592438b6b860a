//! Postgres-backed user store.
//!
//! Ids come from `gen_random_uuid()`, so a freshly created user only gets its
//! identity once the `INSERT ... RETURNING` round trip completes. The email
//! column carries a unique constraint; a violation surfaces as
//! [`RepositoryError::Duplicate`] even when two creates race past the
//! handler's lookup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{RepositoryError, UserRepository};
use crate::features::users::email::Email;
use crate::features::users::user::{User, UserId};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email       TEXT NOT NULL UNIQUE,
    name        TEXT,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL
)
"#;

/// User store over a shared `PgPool`.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        tracing::debug!("users schema ensured");
        Ok(())
    }

    async fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.email().as_str())
        .bind(user.name())
        .bind(user.created_at())
        .bind(user.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, user.email()))?;

        let id: Uuid = row.try_get("id")?;
        Ok(user.with_id(UserId::new(id)))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: User) -> Result<User, RepositoryError> {
        self.insert(user).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }
}

fn user_from_row(row: &PgRow) -> Result<User, RepositoryError> {
    let id: Uuid = row.try_get("id")?;
    let email: String = row.try_get("email")?;
    let name: Option<String> = row.try_get("name")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    let email = Email::parse(&email)
        .map_err(|e| RepositoryError::Corrupt(format!("user {id}: {e}")))?;

    Ok(User::restore(UserId::new(id), email, name, created_at, updated_at))
}

/// Map a unique-constraint violation to `Duplicate`; keep anything else as-is.
fn classify(err: sqlx::Error, email: &Email) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Duplicate(email.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("database said no")]
    struct StubDbError {
        unique: bool,
    }

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "database said no"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::CheckViolation
            }
        }
    }

    fn email() -> Email {
        Email::parse("a@b.com").unwrap()
    }

    #[test]
    fn unique_violation_is_duplicate() {
        let err = sqlx::Error::Database(Box::new(StubDbError { unique: true }));
        assert!(matches!(classify(err, &email()), RepositoryError::Duplicate(ref e) if e == "a@b.com"));
    }

    #[test]
    fn other_failures_stay_database_errors() {
        let constraint = sqlx::Error::Database(Box::new(StubDbError { unique: false }));
        assert!(matches!(classify(constraint, &email()), RepositoryError::Database(_)));
        assert!(matches!(
            classify(sqlx::Error::RowNotFound, &email()),
            RepositoryError::Database(sqlx::Error::RowNotFound)
        ));
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL pointing at a Postgres instance"]
    async fn stores_and_reads_back_users() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let repo = PgUserRepository::new(PgPool::connect(&url).await.unwrap());
        repo.ensure_schema().await.unwrap();

        let address = format!("Pg.{}@example.com", Uuid::now_v7().simple());
        let email = Email::parse(&address).unwrap();
        let saved = repo
            .save(User::new(email.clone(), Some("A".into())).unwrap())
            .await
            .unwrap();
        let id = saved.id().unwrap();

        let by_id = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.email().as_str(), address);
        assert_eq!(by_id.name(), Some("A"));
        let by_email = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(by_email.id(), Some(id));

        let err = repo.save(User::new(email, None).unwrap()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
        assert_eq!(repo.find_by_id(UserId::generate()).await.unwrap(), None);
    }
}
