//! Unified error type.

use thiserror::Error;

use crate::method::Method;

/// The error type returned by routemap's fallible operations.
///
/// Every variant is a programmer error: a lifecycle step taken out of order,
/// or a bad declaration. Nothing here is retried. A mapping that fails to
/// build should stop the service from starting.
#[derive(Debug, Error)]
pub enum Error {
    /// A lifecycle operation was called in the wrong phase (map after freeze,
    /// freeze twice, lookup before freeze, compile twice).
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("invalid argument: url template must not be empty")]
    EmptyTemplate,

    #[error("invalid argument: unknown http method `{0}`")]
    UnknownMethod(String),

    #[error("invalid argument: bad url template `{template}`: {source}")]
    InvalidPattern {
        template: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("invalid argument: controller for `{template}` has no `{action}` action to answer {method}")]
    UnsupportedAction {
        template: String,
        method: Method,
        action: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidState,
    InvalidArgument,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::EmptyTemplate
            | Self::UnknownMethod(_)
            | Self::InvalidPattern { .. }
            | Self::UnsupportedAction { .. } => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::UnsupportedAction {
            template: "/users".into(),
            method: Method::Delete,
            action: "delete".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument: controller for `/users` has no `delete` action to answer DELETE",
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::InvalidState("frozen").kind(), ErrorKind::InvalidState);
    }
}
