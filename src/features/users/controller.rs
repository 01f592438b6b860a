//! HTTP adapter for the users feature.
//!
//! Handlers validate and construct requests, hand them to the mediator and
//! render whatever comes back. No business logic lives here.
//!
//! ## Routes (relative to `/users`)
//!
//! - `POST /`: body `{ email, name? }`, `201 { id, email, name, createdAt }`.
//! - `GET /:id`: `200 { id, email, name, createdAt }`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::Method;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::create_user::CreateUserBody;
use super::get_user::GetUser;
use super::user::{User, UserId};
use crate::error::DomainError;
use crate::http::{json_body, with_timeout, Created};
use crate::mediator::Mediator;
use crate::module::RouteGroup;

/// Public representation of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<User> for UserResponse {
    type Error = DomainError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let id = user
            .id()
            .ok_or_else(|| DomainError::internal("User has no id after save"))?;
        Ok(Self {
            id,
            email: user.email().to_string(),
            name: user.name().map(String::from),
            created_at: user.created_at(),
        })
    }
}

pub struct UsersController {
    mediator: Arc<Mediator>,
    timeout: Option<Duration>,
}

impl UsersController {
    pub fn new(mediator: Arc<Mediator>, timeout: Option<Duration>) -> Self {
        Self { mediator, timeout }
    }

    /// Route group mounted at `/users`.
    pub fn routes(self) -> RouteGroup {
        RouteGroup::new("/users")
            .bind(Method::POST, "/", create_user)
            .bind(Method::GET, "/:id", get_user)
            .with_state(Arc::new(self))
    }
}

/// `POST /users`
async fn create_user(
    State(controller): State<Arc<UsersController>>,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<Created<UserResponse>, DomainError> {
    let command = json_body(body)?.validate()?;
    let user = with_timeout(controller.timeout, controller.mediator.send(command)).await?;
    Ok(Created(user.try_into()?))
}

/// `GET /users/:id`
async fn get_user(
    State(controller): State<Arc<UsersController>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, DomainError> {
    let query = GetUser {
        id: UserId::parse(&id)?,
    };
    let user = with_timeout(controller.timeout, controller.mediator.send(query)).await?;
    Ok(Json(user.try_into()?))
}
