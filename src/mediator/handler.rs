use async_trait::async_trait;

use super::request::{Command, Query, Request};
use crate::error::DomainError;

/// Executes one request type.
///
/// `execute` returns expected failures as `Err` and never panics for them.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    type Request: Request;

    async fn execute(
        &self,
        request: Self::Request,
    ) -> Result<<Self::Request as Request>::Response, DomainError>;
}

/// A handler whose request is a [`Command`].
pub trait CommandHandler: Handler {}

impl<H> CommandHandler for H
where
    H: Handler,
    H::Request: Command,
{
}

/// A handler whose request is a [`Query`].
pub trait QueryHandler: Handler {}

impl<H> QueryHandler for H
where
    H: Handler,
    H::Request: Query,
{
}
