//! Errors of the typed layer.

use docbind_client::{ClientError, DocumentPath, Path};

/// A failure surfaced by the typed bridge.
///
/// Two of these classes forward what the client reported; the rest are
/// produced here, on the decode/encode boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The document's data did not decode into the requested type.
    #[error("failed to decode document at '{path}': {message}")]
    Decode { path: Path, message: String },

    /// The domain value failed to serialize.
    #[error("failed to encode value: {message}")]
    Encode { message: String },

    /// The encoded value is not a field map.
    ///
    /// Documents are maps of named fields; a domain type that serializes
    /// to a scalar or sequence cannot be written as a document. Reported
    /// synchronously from write entry points, before the backend is
    /// contacted.
    #[error("encoded value is not a field map: {message}")]
    InvalidShape { message: String },

    /// The document does not exist but a value was required.
    #[error("document '{path}' does not exist")]
    Missing { path: DocumentPath },

    /// A failure forwarded from the client.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// The backend completed a fetch with neither a snapshot nor an error.
    #[error("backend completed with neither a value nor an error")]
    NoCompletion,
}

impl Error {
    /// Attach a document path to a decode failure that doesn't carry one.
    ///
    /// The conversion helpers don't know which document their input came
    /// from; the snapshot extensions do, and relocate errors on the way out.
    pub(crate) fn located_at(self, at: &DocumentPath) -> Self {
        match self {
            Error::Decode { message, .. } => Error::Decode {
                path: at.as_path().clone(),
                message,
            },
            other => other,
        }
    }
}
