//! Transport-level errors forwarded from backends.
//!
//! Errors at this level are client-originated only: network failures, auth
//! rejections, backend faults. Semantic errors (decode failures, shape
//! violations) belong to the typed layer.

use std::fmt;

/// A failure originating in the document-database client or its backend.
#[derive(Debug)]
pub enum ClientError {
    /// Generic I/O or transport failure (network, IPC, TLS, ...).
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The caller is not authenticated.
    Unauthenticated,

    /// The caller is authenticated but not allowed to touch this path.
    PermissionDenied,

    /// The backend does not support the requested operation.
    ///
    /// For example, listening on a backend without a change feed.
    Unsupported,

    /// A backend-reported fault with a protocol-specific code.
    Backend {
        /// Backend-specific error code (an HTTP status for REST backends).
        code: u16,
        message: String,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "transport error: {}", e),
            ClientError::Unauthenticated => write!(f, "not authenticated"),
            ClientError::PermissionDenied => write!(f, "permission denied"),
            ClientError::Unsupported => write!(f, "operation not supported by this backend"),
            ClientError::Backend { code, message } => {
                if message.is_empty() {
                    write!(f, "backend error: code {}", code)
                } else {
                    write!(f, "backend error: code {} - {}", code, message)
                }
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Transport(Box::new(e))
    }
}
