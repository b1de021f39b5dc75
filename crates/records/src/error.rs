use envoy_core::error::CoreError;

/// Errors raised by the record store.
///
/// A missing record is not an error: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection '{key}' could not be (de)serialized: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
