//! Typed error enum for the document-store client.

use thiserror::Error;

/// Errors from document-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("credentials error: {0}")]
    Credentials(String),
    #[error("missing field in response: {0}")]
    MissingField(&'static str),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl StoreError {
    /// Whether the failure originated on the remote store rather than in
    /// this process.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::HttpRequest(_) | Self::HttpStatus { .. } | Self::JsonParse { .. }
        )
    }
}
