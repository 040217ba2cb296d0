//! Persistence ports for fund usages and payment proofs.

use async_trait::async_trait;
use common::EntityId;
use thiserror::Error;

use crate::fund_usage::FundUsage;
use crate::payment_proof::PaymentProof;
use crate::storage::FileId;

/// Errors returned by repository adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached or rejected the call.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    /// The record to update does not exist.
    #[error("{entity} {id} not found in repository")]
    Missing { entity: &'static str, id: EntityId },
}

/// Storage of fund usage reports.
#[async_trait]
pub trait FundUsageRepository: Send + Sync {
    /// Persists a new report.
    async fn add_fund_usage(&self, fund_usage: &FundUsage) -> Result<(), RepositoryError>;

    /// Replaces a stored report with the same id.
    async fn update_fund_usage(&self, fund_usage: &FundUsage) -> Result<(), RepositoryError>;

    /// Loads a report by id, if present.
    async fn is_fund_usage_id_exist(
        &self,
        id: EntityId,
    ) -> Result<Option<FundUsage>, RepositoryError>;

    /// Returns true if a report for the sub-activity and recipient exists in
    /// the given month.
    async fn is_fund_usage_same_hr_exist(
        &self,
        sub_activity: &str,
        month: u32,
        year: i32,
        recipient: &str,
    ) -> Result<bool, RepositoryError>;
}

/// Storage of payment proofs.
#[async_trait]
pub trait PaymentProofRepository: Send + Sync {
    /// Loads a payment proof by id, if present.
    async fn is_payment_proof_id_exist(
        &self,
        id: EntityId,
    ) -> Result<Option<PaymentProof>, RepositoryError>;

    /// Replaces a stored payment proof. `old_file_id` is the file the record
    /// referenced before this update, if any.
    async fn update_payment_proof(
        &self,
        payment_proof: &PaymentProof,
        old_file_id: Option<&FileId>,
    ) -> Result<(), RepositoryError>;
}
