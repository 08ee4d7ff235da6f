//! Error types shared by the pipeline, the provider and the page controllers.

use crate::models::record::EntityKind;

/// Failure reported by a [`DataProvider`](crate::services::data_provider::DataProvider).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The backing source could not be reached.
    #[error("data provider unavailable: {0}")]
    Unavailable(String),

    /// Only role records accept status mutations.
    #[error("{0} records are read-only")]
    ReadOnly(EntityKind),

    #[error("invalid status value '{0}'")]
    InvalidStatus(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Invalid query parameters or configuration values.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{kind} record {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A sum or max was requested over a field holding a non-numeric value.
    #[error("field '{field}' is not numeric")]
    NonNumericField { field: String },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
