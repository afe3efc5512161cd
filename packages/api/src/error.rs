//! Transport-level errors from the backend client.

use thiserror::Error;

use crate::models::Level;

/// A failed backend call. Flows wrap this into their own error types and show a
/// generic message; the details only reach the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0:?} options are not fetched by parent id")]
    NoParentEndpoint(Level),
}
