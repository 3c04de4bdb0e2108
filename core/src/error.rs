use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A single-result fetch matched more than one row
    #[error("Non-unique result: query returned more than one row")]
    NonUniqueResult,

    /// A column references an alias that no FROM or JOIN clause declares
    #[error("Translation error: alias \"{0}\" is not declared in any FROM or JOIN clause")]
    UndeclaredAlias(String),

    /// An entity references another entity that has not been persisted yet
    #[error("Transient reference: {entity} references an unsaved {reference}")]
    TransientReference {
        entity: &'static str,
        reference: &'static str,
    },

    /// Error mapping a row or value into a Rust type
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

impl From<core::num::TryFromIntError> for QueryError {
    fn from(value: core::num::TryFromIntError) -> Self {
        QueryError::Mapping(value.to_string())
    }
}

/// Result type for query operations
pub type Result<T> = core::result::Result<T, QueryError>;
