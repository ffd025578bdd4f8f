use thiserror::Error;

#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response at {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Catalog response is missing the top-level Response flag")]
    MissingResponseFlag,
}

impl OmdbError {
    /// Whether the error occurred reaching the catalog, as opposed to
    /// decoding a reply that did arrive intact.
    pub fn is_transport(&self) -> bool {
        matches!(self, OmdbError::Request(_) | OmdbError::Api { .. })
    }
}
