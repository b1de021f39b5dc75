use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Unknown setting '{name}'")]
    UnknownSetting {
        name: String,
        known: Vec<&'static str>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
