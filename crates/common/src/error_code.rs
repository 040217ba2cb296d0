//! Error taxonomy shared by every command in the core.

use serde::{Deserialize, Serialize};

/// The terminal error class of a command.
///
/// The HTTP layer maps these one-to-one onto response statuses, so the
/// numeric value returned by [`ErrorCode::status`] is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A business rule rejected the input.
    BadRequest,

    /// A referenced record does not exist.
    NotFound,

    /// Transport, persistence or storage failure.
    InternalServerError,
}

impl ErrorCode {
    /// Returns the numeric status carried on the wire.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::InternalServerError => 500,
        }
    }

    /// Maps a numeric status back onto the taxonomy.
    ///
    /// Statuses outside the taxonomy collapse to `InternalServerError`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::BadRequest,
            404 => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// Returns the code name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
