//! Domain layer for the finance orchestration core.
//!
//! This crate provides:
//! - Fund usage and payment proof entities with their validation rules
//! - Master data records as answered by the master-data module
//! - The fund usage domain service (honorarium uniqueness)
//! - Repository and file storage ports with in-memory adapters

pub mod error;
pub mod fund_usage;
pub mod master_data;
pub mod memory;
pub mod money;
pub mod payment_proof;
pub mod repository;
pub mod storage;

pub use error::DomainError;
pub use fund_usage::{
    FundUsage, FundUsageInput, FundUsageService, HONORARIUM_ACTIVITY, HR_SUB_ACTIVITY_PREFIX,
    HonorariumKey, Period, is_honorarium_activity, is_honorarium_sub_activity,
};
pub use master_data::{MasterDataRecord, MasterDataType, find_master_data};
pub use memory::{InMemoryFundUsageRepository, InMemoryPaymentProofRepository};
pub use money::Rupiah;
pub use payment_proof::{PaymentProof, PaymentProofInput};
pub use repository::{FundUsageRepository, PaymentProofRepository, RepositoryError};
pub use storage::{FileId, FileStorage, FileUpload, InMemoryFileStorage, StorageError, StoredFile};
