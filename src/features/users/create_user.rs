//! `users.create`: register a new user and send them a welcome message.
//!
//! The welcome is fire-and-forget. It is spawned once the user is saved, so
//! a slow or failing notifier never delays or fails the create.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::email::Email;
use super::notifier::{Notification, Notifier};
use super::repository::UserRepository;
use super::user::{normalize_name, User};
use crate::error::{DomainError, FieldErrors};
use crate::mediator::{Command, Handler, Request, RequestKind};

/// A validated request to create a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub email: Email,
    pub name: Option<String>,
}

impl Request for CreateUser {
    const NAME: &'static str = "users.create";
    const KIND: RequestKind = RequestKind::Command;
    type Response = User;
}

impl Command for CreateUser {}

/// Raw `POST /users` body, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CreateUserBody {
    /// Check every field and build the command, or report all field errors
    /// at once.
    pub fn validate(self) -> Result<CreateUser, DomainError> {
        let mut details = FieldErrors::new();

        let email = match Email::parse(self.email.as_deref().unwrap_or_default()) {
            Ok(email) => Some(email),
            Err(e) => {
                details.entry("email".into()).or_default().push(e.to_string());
                None
            }
        };

        let name = match self.name.as_deref().map(normalize_name).transpose() {
            Ok(name) => name,
            Err(msg) => {
                details.entry("name".into()).or_default().push(msg);
                None
            }
        };

        match email {
            Some(email) if details.is_empty() => Ok(CreateUser { email, name }),
            _ => Err(DomainError::validation_fields(details)),
        }
    }
}

pub struct CreateUserHandler {
    repository: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CreateUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

#[async_trait]
impl Handler for CreateUserHandler {
    type Request = CreateUser;

    async fn execute(&self, request: CreateUser) -> Result<User, DomainError> {
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::conflict("User"));
        }

        let user = User::new(request.email, request.name)?;
        let user = self.repository.save(user).await?;

        // The user is stored; the welcome runs on its own task.
        let notifier = Arc::clone(&self.notifier);
        let target = user.email().to_string();
        let welcome = Notification::welcome(&user);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&target, &welcome).await {
                tracing::warn!(email = %target, error = %e, "welcome notification failed");
            }
        });

        tracing::info!(
            user_id = ?user.id().map(|id| id.to_string()),
            email = %user.email(),
            "user created"
        );
        Ok(user)
    }
}
