//! Saga error types.

use common::{EntityId, ErrorCode};
use domain::{DomainError, RepositoryError, StorageError};
use event_bus::RoundTripError;
use thiserror::Error;

/// The single terminal failure of an orchestrator run.
///
/// Business and transport failures keep their original message so the
/// caller can show it as is.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The record to update does not exist.
    #[error("{entity} dengan id {id} tidak ditemukan")]
    NotFound { entity: &'static str, id: EntityId },

    /// A business rule rejected the input.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A step's round-trip failed or its responder rejected it.
    #[error(transparent)]
    RoundTrip(#[from] RoundTripError),

    /// Persistence failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// File storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A responder answered with a value the step cannot use.
    #[error("Unexpected reply to step '{step}': {reason}")]
    UnexpectedReply { step: &'static str, reason: String },
}

impl SagaError {
    /// Returns the error class the caller maps to a status.
    pub fn code(&self) -> ErrorCode {
        match self {
            SagaError::NotFound { .. } => ErrorCode::NotFound,
            SagaError::Domain(err) => err.code(),
            SagaError::RoundTrip(err) => err.code(),
            SagaError::Repository(_) | SagaError::Storage(_) | SagaError::UnexpectedReply { .. } => {
                ErrorCode::InternalServerError
            }
        }
    }

    /// Returns the HTTP-style status to report.
    ///
    /// A responder's rejection keeps its own status; everything else uses
    /// the status of [`SagaError::code`].
    pub fn status(&self) -> u16 {
        match self {
            SagaError::RoundTrip(err) => err.status(),
            other => other.code().status(),
        }
    }
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
