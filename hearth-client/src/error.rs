//! Client error type.

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the listing client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but the answer is a failure.
    ///
    /// Raised for non-2xx statuses *and* for any body carrying an `error`
    /// field, whatever the status: the body marker is the primary failure
    /// signal, the status only corroborates it.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Human-readable message from the error body
        message: String,
    },

    /// The body was not the JSON shape the operation expects.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
