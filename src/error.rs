use thiserror::Error;

/// Errors that can occur when talking to the remote catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Network failure or non-success HTTP status
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("Malformed catalog response: {0}")]
    Parse(#[from] serde_json::Error),
}
