//! The `User` entity.
//!
//! A user is created with [`User::new`], which checks its invariants and
//! stamps the timestamps. Its identity stays unset until a
//! [`UserRepository`](super::UserRepository) saves it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email::Email;
use crate::error::DomainError;

pub const MAX_NAME_LEN: usize = 100;

/// Identity assigned by the persistence boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        UserId(id)
    }

    /// A new time-ordered id.
    pub fn generate() -> Self {
        UserId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw)
            .map(UserId)
            .map_err(|_| DomainError::invalid_field("id", "id must be a valid UUID"))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: Option<UserId>,
    email: Email,
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a not-yet-persisted user.
    ///
    /// The name is trimmed; when present it must be 1 to 100 characters.
    pub fn new(email: Email, name: Option<String>) -> Result<Self, DomainError> {
        let name = match name {
            Some(name) => Some(normalize_name(&name).map_err(|msg| DomainError::invalid_field("name", msg))?),
            None => None,
        };
        let now = Utc::now();
        Ok(User {
            id: None,
            email,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a persisted user from storage.
    pub fn restore(
        id: UserId,
        email: Email,
        name: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        User {
            id: Some(id),
            email,
            name,
            created_at,
            updated_at,
        }
    }

    /// The same user carrying the identity storage assigned to it.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Trim a display name and check its length.
pub fn normalize_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("name must be at most {} characters", MAX_NAME_LEN));
    }
    Ok(trimmed.to_string())
}
