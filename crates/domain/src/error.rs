//! Domain error types.

use common::ErrorCode;
use thiserror::Error;

use crate::fund_usage::Period;
use crate::master_data::MasterDataType;
use crate::repository::RepositoryError;

/// Errors raised by entity validation and domain services.
///
/// Messages are shown to end users as they are.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required input field is blank.
    #[error("{field} wajib diisi")]
    MissingField { field: &'static str },

    /// The amount is zero or negative.
    #[error("Jumlah {amount} tidak valid, harus lebih dari 0")]
    InvalidAmount { amount: i64 },

    /// The value is not registered in master data.
    #[error("{kind} {value} tidak terdaftar")]
    UnknownMasterData { kind: MasterDataType, value: String },

    /// Activity and sub-activity disagree on being honorarium.
    #[error("Aktivitas {activity} tidak sesuai dengan sub aktivitas {sub_activity}")]
    ActivityMismatch {
        activity: String,
        sub_activity: String,
    },

    /// An honorarium for the same sub-activity, recipient and month exists.
    #[error(
        "Data penggunaan dana untuk sub aktivitas {sub_activity} kepada {recipient} pada {period} telah dilaporkan"
    )]
    AlreadyReported {
        sub_activity: String,
        recipient: String,
        period: Period,
    },

    /// Fields required by the payment type are missing.
    #[error("{fields} wajib diisi untuk jenis pembayaran {payment_type}")]
    MissingRequiredFields {
        payment_type: String,
        fields: String,
    },

    /// The repository failed while a domain service consulted it.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    /// Returns the error class this failure maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Repository(_) => ErrorCode::InternalServerError,
            _ => ErrorCode::BadRequest,
        }
    }
}
