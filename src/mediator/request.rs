use std::fmt;

/// Whether a request mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Command,
    Query,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Command => f.write_str("command"),
            RequestKind::Query => f.write_str("query"),
        }
    }
}

/// A single intended operation, routed by its `NAME`.
///
/// `NAME` must be unique across every request type registered on a
/// mediator. By convention it is `"<feature>.<verb>"`, e.g. `"users.create"`.
pub trait Request: Send + 'static {
    const NAME: &'static str;
    const KIND: RequestKind;
    type Response: Send + 'static;
}

/// A request that mutates state.
pub trait Command: Request {}

/// A request that only reads.
pub trait Query: Request {}
