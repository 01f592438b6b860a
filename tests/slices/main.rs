//! Vertical slice integration tests.

mod support;
mod startup;
mod users;
mod http;
