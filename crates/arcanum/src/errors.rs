use thiserror::Error;

/// Failures that can occur while relaying one chat request.
///
/// Status codes are carried as plain `u16` so the library stays independent of
/// whichever `http` version the serving layer is built against.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("API key required")]
    MissingApiKey,

    #[error("Upstream rejected credentials ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("Upstream request failed ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed stream frame: {payload}")]
    MalformedFrame {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Upstream stream ended before completion: {0}")]
    TruncatedStream(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    /// Classify a non-success upstream response.
    pub fn from_upstream(status: u16, body: String) -> Self {
        match status {
            401 | 403 => RelayError::Authentication { status, body },
            _ => RelayError::Upstream { status, body },
        }
    }

    /// HTTP status the relay answers with when this error ends a request.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation(_) | RelayError::MissingApiKey => 400,
            RelayError::Authentication { status, .. } | RelayError::Upstream { status, .. } => {
                *status
            }
            RelayError::MalformedFrame { .. }
            | RelayError::TruncatedStream(_)
            | RelayError::Internal(_) => 500,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Internal(anyhow::Error::new(err).context("upstream transport failure"))
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
