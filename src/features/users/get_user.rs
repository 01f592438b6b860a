//! `users.get`: look a user up by id.

use std::sync::Arc;

use async_trait::async_trait;

use super::repository::UserRepository;
use super::user::{User, UserId};
use crate::error::DomainError;
use crate::mediator::{Handler, Query, Request, RequestKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetUser {
    pub id: UserId,
}

impl Request for GetUser {
    const NAME: &'static str = "users.get";
    const KIND: RequestKind = RequestKind::Query;
    type Response = User;
}

impl Query for GetUser {}

pub struct GetUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Handler for GetUserHandler {
    type Request = GetUser;

    async fn execute(&self, request: GetUser) -> Result<User, DomainError> {
        self.repository
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}
