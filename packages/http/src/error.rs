use kvtree_core::Error as CoreError;

use crate::types::EtcdErrorBody;

/// etcd error code for a missing key.
pub const KEY_NOT_FOUND: i64 = 100;

/// etcd error code for an internal raft failure.
pub const RAFT_INTERNAL: i64 = 300;

/// etcd error code while the cluster is electing a leader.
pub const LEADER_ELECTION: i64 = 301;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("etcd error {}: {}", .0.error_code, .0.message)]
    Etcd(EtcdErrorBody),

    #[error("Response to '{action}' carried no node")]
    MissingNode { action: String },

    #[error("Unexpected response: HTTP {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this is etcd's "key not found".
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::Etcd(body) if body.error_code == KEY_NOT_FOUND)
    }

    /// Whether the store answered but could not serve the request: a
    /// gateway 502/503/504 page, or an etcd raft / leader election error.
    pub fn is_store_unavailable(&self) -> bool {
        match self {
            Error::Etcd(body) => matches!(body.error_code, RAFT_INTERNAL | LEADER_ELECTION),
            Error::UnexpectedResponse { status, .. } => matches!(*status, 502..=504),
            _ => false,
        }
    }
}

impl From<Error> for CoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidArgument { message } => CoreError::InvalidArgument { message },
            Error::Http(e) if e.is_decode() => CoreError::protocol(e.to_string()),
            Error::Http(e) => CoreError::unavailable(e.to_string()),
            Error::UrlParse(_) | Error::InvalidUrl { .. } => {
                CoreError::invalid_argument(error.to_string())
            }
            _ if error.is_store_unavailable() => CoreError::unavailable(error.to_string()),
            Error::Json(_)
            | Error::Etcd(_)
            | Error::MissingNode { .. }
            | Error::UnexpectedResponse { .. } => {
                CoreError::protocol(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvtree_core::ErrorKind;

    fn etcd(code: i64) -> Error {
        Error::Etcd(EtcdErrorBody {
            error_code: code,
            message: "Key not found".to_string(),
            cause: Some("/missing".to_string()),
            index: Some(7),
        })
    }

    #[test]
    fn etcd_display() {
        let display = etcd(100).to_string();
        assert!(display.contains("100"));
        assert!(display.contains("Key not found"));
    }

    #[test]
    fn key_not_found_detection() {
        assert!(etcd(100).is_key_not_found());
        assert!(!etcd(101).is_key_not_found());
    }

    #[test]
    fn core_mapping() {
        let e: CoreError = etcd(105).into();
        assert_eq!(e.kind(), ErrorKind::StoreProtocolError);

        let e: CoreError = Error::invalid_argument("key must not be empty").into();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: CoreError = Error::Json(json_err).into();
        assert_eq!(e.kind(), ErrorKind::StoreProtocolError);

        let e: CoreError = Error::UnexpectedResponse {
            status: 500,
            body: "<html>oops</html>".to_string(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::StoreProtocolError);

        let e: CoreError = Error::MissingNode {
            action: "get".to_string(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::StoreProtocolError);
    }

    #[test]
    fn gateway_pages_are_unavailable() {
        for status in [502, 503, 504] {
            let e: CoreError = Error::UnexpectedResponse {
                status,
                body: "Service Unavailable".to_string(),
            }
            .into();
            assert_eq!(e.kind(), ErrorKind::StoreUnavailable, "HTTP {}", status);
        }
    }

    #[test]
    fn cluster_health_errors_are_unavailable() {
        let e: CoreError = etcd(RAFT_INTERNAL).into();
        assert_eq!(e.kind(), ErrorKind::StoreUnavailable);

        let e: CoreError = etcd(LEADER_ELECTION).into();
        assert_eq!(e.kind(), ErrorKind::StoreUnavailable);

        let e: CoreError = etcd(101).into();
        assert_eq!(e.kind(), ErrorKind::StoreProtocolError);
    }
}
