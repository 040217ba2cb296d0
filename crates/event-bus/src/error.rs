use common::ErrorCode;
use thiserror::Error;

/// Error raised by a listener while handling an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    /// Creates a listener error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<serde_json::Error> for ListenerError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Errors that can occur when publishing on the event channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// One or more listeners failed. Every listener still ran.
    #[error("{failed} of {delivered} listeners for '{name}' failed: {first}")]
    ListenerFailed {
        name: String,
        delivered: usize,
        failed: usize,
        first: ListenerError,
    },

    /// A payload could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Errors that end a single request/reply round-trip.
#[derive(Debug, Error)]
pub enum RoundTripError {
    /// Nobody answered before the timeout, or the waiting listener was
    /// removed before a reply arrived.
    #[error("no responder answered '{request}' within {timeout_ms} ms")]
    NoResponder { request: String, timeout_ms: u64 },

    /// The responder answered with a structured failure.
    #[error("{message}")]
    Rejected { code: u16, message: String },

    /// Publishing the request failed inside a listener.
    #[error("responder for '{request}' failed: {source}")]
    Responder {
        request: String,
        #[source]
        source: ChannelError,
    },

    /// The request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RoundTripError {
    /// Returns the error class this failure maps to.
    ///
    /// Structured rejections keep the responder's code; every other failure
    /// is a transport failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            RoundTripError::Rejected { code, .. } => ErrorCode::from_status(*code),
            _ => ErrorCode::InternalServerError,
        }
    }

    /// Returns the numeric status to report.
    ///
    /// A structured rejection reports the responder's own code, even one
    /// outside the [`ErrorCode`] taxonomy.
    pub fn status(&self) -> u16 {
        match self {
            RoundTripError::Rejected { code, .. } => *code,
            _ => self.code().status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_responder_code_and_message() {
        let err = RoundTripError::Rejected {
            code: 404,
            message: "Master data tidak ditemukan".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "Master data tidak ditemukan");
    }

    #[test]
    fn rejected_keeps_status_outside_the_taxonomy() {
        let err = RoundTripError::Rejected {
            code: 409,
            message: "Gaji sudah dibayar".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::InternalServerError);
        assert_eq!(err.status(), 409);
    }

    #[test]
    fn transport_failures_are_internal() {
        let err = RoundTripError::NoResponder {
            request: "MasterDataRequested".to_string(),
            timeout_ms: 50,
        };
        assert_eq!(err.code(), ErrorCode::InternalServerError);
        assert_eq!(err.status(), 500);
        assert_eq!(
            err.to_string(),
            "no responder answered 'MasterDataRequested' within 50 ms"
        );

        let err = RoundTripError::Responder {
            request: "PayEmployeeSalary".to_string(),
            source: ChannelError::ListenerFailed {
                name: "PayEmployeeSalary".to_string(),
                delivered: 1,
                failed: 1,
                first: ListenerError::new("boom"),
            },
        };
        assert_eq!(err.code(), ErrorCode::InternalServerError);
    }
}
