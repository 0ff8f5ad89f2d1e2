use std::fmt;

use itertools::Itertools;

use crate::message::{render, Message};

/// The error produced when an assertion does not hold.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required value was absent.
    #[error("{0}")]
    NullArgument(String),
    /// A value was present but violated a precondition.
    #[error("{0}")]
    InvalidArgument(String),
    /// An invariant expected to hold at some point of a computation did not.
    #[error("{message}")]
    InvalidState {
        /// Describes the violated invariant
        message: String,
        /// The error that caused the violation, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// The emptiness of a value could not be determined for its runtime type.
    #[error("{message}")]
    UnsupportedType {
        /// Lists the offending types
        message: String,
        /// The names of the offending types
        types: Vec<String>,
    },
}

/// Identifies the kind of an [`Error`] without its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum ErrorKind {
    NullArgument,
    InvalidArgument,
    InvalidState,
    UnsupportedType,
}

/// A `Result` with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NullArgument(_) => ErrorKind::NullArgument,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::InvalidState { .. } => ErrorKind::InvalidState,
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
        }
    }

    /// Constructs an [`Error::NullArgument`] from a message.
    pub fn null_argument(msg: impl Message) -> Self {
        Error::NullArgument(render(msg))
    }

    /// Constructs an [`Error::InvalidArgument`] from a message.
    pub fn invalid_argument(msg: impl Message) -> Self {
        Error::InvalidArgument(render(msg))
    }

    /// Constructs an [`Error::InvalidState`] without an underlying cause.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Error::InvalidState {
            message: message.into(),
            source: None,
        }
    }

    /// Constructs an [`Error::InvalidState`] that wraps the error that caused it.
    pub fn invalid_state_caused_by(
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::InvalidState {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Constructs an [`Error::UnsupportedType`] for the given offending types. The message lists
    /// the types as `by: T` for a single type or `by: [T1, T2]` for several.
    pub fn unsupported_type<I>(types: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let types: Vec<String> = types.into_iter().map(|ty| ty.to_string()).collect();
        let message = if let [ty] = types.as_slice() {
            format!("by: {ty}")
        } else {
            format!("by: [{}]", types.iter().join(", "))
        };
        Error::UnsupportedType { message, types }
    }

    /// Returns the offending types if this is an [`Error::UnsupportedType`].
    pub fn unsupported_types(&self) -> Option<&[String]> {
        match self {
            Error::UnsupportedType { types, .. } => Some(types),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{Error, ErrorKind};

    #[test]
    fn unsupported_single_type() {
        let err = Error::unsupported_type(["std::fs::File"]);
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.to_string(), "by: std::fs::File");
        assert_eq!(err.unsupported_types(), Some(&["std::fs::File".to_owned()][..]));
    }

    #[test]
    fn unsupported_multiple_types() {
        let err = Error::unsupported_type(["u8", "char"]);
        insta::assert_snapshot!(err.to_string(), @"by: [u8, char]");
    }

    #[test]
    fn invalid_state_keeps_cause() {
        let cause = Error::InvalidArgument("inner".to_owned());
        let err = Error::invalid_state_caused_by("outer", cause);
        assert_eq!(err.to_string(), "outer");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("inner"));
        assert!(Error::invalid_state("bare").source().is_none());
    }
}
