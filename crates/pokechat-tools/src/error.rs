use thiserror::Error;

/// Errors raised while looking up upstream records
///
/// Upstream error payloads (e.g. `Not Found`) are not errors; they are
/// passed through to the caller as data.
#[derive(Debug, Error)]
pub enum PokeApiError {
    /// The request never produced a response
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// An id-resolution step returned a record without a numeric id
    #[error("no numeric id in {resource} record for `{key}`")]
    MissingId { resource: &'static str, key: String },
}

impl From<PokeApiError> for rmcp::ErrorData {
    fn from(e: PokeApiError) -> Self {
        Self::internal_error(e.to_string(), None)
    }
}
