/// Errors from the upstream game API layer.
#[derive(Debug, thiserror::Error)]
pub enum GameApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned a non-2xx status code.
    #[error("Game API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the JSON shape we expect.
    #[error("Malformed game API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GameApiError {
    /// Upstream HTTP status, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GameApiError::Status { status, .. } => Some(*status),
            GameApiError::Request(err) => err.status().map(|s| s.as_u16()),
            GameApiError::Decode(_) => None,
        }
    }
}
