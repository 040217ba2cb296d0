//! In-memory repository adapters for testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::EntityId;

use crate::fund_usage::FundUsage;
use crate::payment_proof::PaymentProof;
use crate::repository::{FundUsageRepository, PaymentProofRepository, RepositoryError};
use crate::storage::FileId;

#[derive(Debug, Default)]
struct InMemoryFundUsageState {
    records: HashMap<EntityId, FundUsage>,
    fail_on_write: bool,
    fail_on_read: bool,
    add_count: usize,
    update_count: usize,
    hr_check_count: usize,
}

/// In-memory fund usage repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFundUsageRepository {
    state: Arc<RwLock<InMemoryFundUsageState>>,
}

impl InMemoryFundUsageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record directly, bypassing the write counters.
    pub fn insert(&self, fund_usage: FundUsage) {
        self.state
            .write()
            .unwrap()
            .records
            .insert(fund_usage.id(), fund_usage);
    }

    /// Makes every following add/update fail.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.state.write().unwrap().fail_on_write = fail;
    }

    /// Makes every following lookup fail.
    pub fn set_fail_on_read(&self, fail: bool) {
        self.state.write().unwrap().fail_on_read = fail;
    }

    pub fn get(&self, id: EntityId) -> Option<FundUsage> {
        self.state.read().unwrap().records.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `add_fund_usage` calls, failed ones included.
    pub fn add_count(&self) -> usize {
        self.state.read().unwrap().add_count
    }

    /// Number of `update_fund_usage` calls, failed ones included.
    pub fn update_count(&self) -> usize {
        self.state.read().unwrap().update_count
    }

    /// Number of uniqueness lookups.
    pub fn hr_check_count(&self) -> usize {
        self.state.read().unwrap().hr_check_count
    }
}

#[async_trait]
impl FundUsageRepository for InMemoryFundUsageRepository {
    async fn add_fund_usage(&self, fund_usage: &FundUsage) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.add_count += 1;

        if state.fail_on_write {
            return Err(RepositoryError::Unavailable("write rejected".to_string()));
        }

        state.records.insert(fund_usage.id(), fund_usage.clone());
        Ok(())
    }

    async fn update_fund_usage(&self, fund_usage: &FundUsage) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.update_count += 1;

        if state.fail_on_write {
            return Err(RepositoryError::Unavailable("write rejected".to_string()));
        }

        match state.records.get_mut(&fund_usage.id()) {
            Some(record) => {
                *record = fund_usage.clone();
                Ok(())
            }
            None => Err(RepositoryError::Missing {
                entity: "FundUsage",
                id: fund_usage.id(),
            }),
        }
    }

    async fn is_fund_usage_id_exist(
        &self,
        id: EntityId,
    ) -> Result<Option<FundUsage>, RepositoryError> {
        let state = self.state.read().unwrap();
        if state.fail_on_read {
            return Err(RepositoryError::Unavailable("read rejected".to_string()));
        }
        Ok(state.records.get(&id).cloned())
    }

    async fn is_fund_usage_same_hr_exist(
        &self,
        sub_activity: &str,
        month: u32,
        year: i32,
        recipient: &str,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.hr_check_count += 1;

        if state.fail_on_read {
            return Err(RepositoryError::Unavailable("read rejected".to_string()));
        }

        Ok(state.records.values().any(|record| {
            let period = record.period();
            record.is_honorarium()
                && record.sub_activity() == sub_activity
                && record.recipient() == recipient
                && period.month() == month
                && period.year() == year
        }))
    }
}

#[derive(Debug, Default)]
struct InMemoryPaymentProofState {
    records: HashMap<EntityId, PaymentProof>,
    fail_on_write: bool,
    updates: Vec<Option<FileId>>,
}

/// In-memory payment proof repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentProofRepository {
    state: Arc<RwLock<InMemoryPaymentProofState>>,
}

impl InMemoryPaymentProofRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record directly.
    pub fn insert(&self, payment_proof: PaymentProof) {
        self.state
            .write()
            .unwrap()
            .records
            .insert(payment_proof.id(), payment_proof);
    }

    /// Makes every following update fail.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.state.write().unwrap().fail_on_write = fail;
    }

    pub fn get(&self, id: EntityId) -> Option<PaymentProof> {
        self.state.read().unwrap().records.get(&id).cloned()
    }

    /// Number of `update_payment_proof` calls, failed ones included.
    pub fn update_count(&self) -> usize {
        self.state.read().unwrap().updates.len()
    }

    /// The `old_file_id` passed to each update, in call order.
    pub fn old_file_ids(&self) -> Vec<Option<FileId>> {
        self.state.read().unwrap().updates.clone()
    }
}

#[async_trait]
impl PaymentProofRepository for InMemoryPaymentProofRepository {
    async fn is_payment_proof_id_exist(
        &self,
        id: EntityId,
    ) -> Result<Option<PaymentProof>, RepositoryError> {
        Ok(self.state.read().unwrap().records.get(&id).cloned())
    }

    async fn update_payment_proof(
        &self,
        payment_proof: &PaymentProof,
        old_file_id: Option<&FileId>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.updates.push(old_file_id.cloned());

        if state.fail_on_write {
            return Err(RepositoryError::Unavailable("write rejected".to_string()));
        }

        match state.records.get_mut(&payment_proof.id()) {
            Some(record) => {
                *record = payment_proof.clone();
                Ok(())
            }
            None => Err(RepositoryError::Missing {
                entity: "PaymentProof",
                id: payment_proof.id(),
            }),
        }
    }
}
