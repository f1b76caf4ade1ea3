//! Error types for the walker and its store clients.

/// Errors surfaced by [`TreeWalker`](crate::TreeWalker) and [`StoreClient`](crate::StoreClient)
/// implementations.
///
/// Store errors are never recovered inside the walker: the first failure
/// aborts the whole walk and no partial result is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was empty or malformed. Raised before any fetch.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The store could not be reached (connection, timeout, transport).
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The store answered, but with something we could not interpret.
    #[error("store protocol error: {message}")]
    StoreProtocolError { message: String },
}

/// Discriminant of [`Error`], for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    StoreUnavailable,
    StoreProtocolError,
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Error::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Error::StoreProtocolError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            Error::StoreProtocolError { .. } => ErrorKind::StoreProtocolError,
        }
    }
}
