/// Errors from the backend HTTP layer.
///
/// Every variant is a delivery failure as far as callers are concerned:
/// the synchronizer aborts and retries later, the check-in engine
/// enqueues the update.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP request itself failed (network, DNS, timeout, body
    /// decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("backend returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
