use thiserror::Error;

/// Boxed error used as the cause of a [`DataProcessingError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a table backend or while decoding its rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// The single failure kind surfaced by the data access layer.
///
/// Carries the name of the component that failed (for example
/// `WorkshopDao`) and the originating cause, reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("Error in {origin}: {source}")]
pub struct DataProcessingError {
    origin: String,
    #[source]
    source: BoxError,
}

impl DataProcessingError {
    pub fn new(origin: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Name of the component that raised the failure.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Result type for data access operations.
pub type Result<T> = std::result::Result<T, DataProcessingError>;
