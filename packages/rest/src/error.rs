use docbind_client::ClientError;

/// Configuration and URL-construction errors.
///
/// Failures during an operation are reported as [`ClientError`] through
/// the boundary callbacks; this type only covers setting the client up.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("invalid URL: {message}")]
    InvalidUrl { message: String },
}

impl From<Error> for ClientError {
    fn from(error: Error) -> Self {
        ClientError::Transport(Box::new(error))
    }
}
