use std::sync::Arc;

use common::EntityId;
use domain::{FundUsage, FundUsageInput, FundUsageRepository, FundUsageService};
use event_bus::{EventChannel, Requester};

use super::{persist, verify_fund_usage_master_data};
use crate::error::SagaError;
use crate::state::SagaRun;
use crate::steps::{cancel_salary, pay_salary, update_salary};
use crate::topics::{
    SAGA_UPDATE_FUND_USAGE, STEP_CANCEL_SALARY, STEP_PAY_SALARY, STEP_UPDATE_SALARY,
};

/// Revises a stored fund usage and keeps payroll in line with it.
///
/// Payroll is told, depending on what the record was and becomes:
///
/// | stored      | revised                 | payroll                   |
/// |-------------|-------------------------|---------------------------|
/// | honorarium  | honorarium, same month  | update salary             |
/// | honorarium  | honorarium, other month | check unique, cancel      |
/// | honorarium  | other                   | cancel                    |
/// | other       | honorarium              | check unique, pay         |
/// | other       | other                   | nothing                   |
pub struct UpdateFundUsage<C: EventChannel, R: FundUsageRepository> {
    requester: Requester<C>,
    repository: Arc<R>,
    service: FundUsageService<R>,
}

impl<C: EventChannel, R: FundUsageRepository> UpdateFundUsage<C, R> {
    pub fn new(requester: Requester<C>, repository: Arc<R>) -> Self {
        let service = FundUsageService::new(Arc::clone(&repository));
        Self {
            requester,
            repository,
            service,
        }
    }

    /// Runs the saga and returns the stored revision.
    #[tracing::instrument(
        skip(self, input),
        fields(saga_type = SAGA_UPDATE_FUND_USAGE, fund_usage_id = %id)
    )]
    pub async fn execute(
        &self,
        id: EntityId,
        input: FundUsageInput,
    ) -> Result<FundUsage, SagaError> {
        let mut run = SagaRun::start(SAGA_UPDATE_FUND_USAGE);
        let result = self.run(id, input, &mut run).await;
        run.finish(&result);
        result
    }

    async fn run(
        &self,
        id: EntityId,
        input: FundUsageInput,
        run: &mut SagaRun,
    ) -> Result<FundUsage, SagaError> {
        let stored = self
            .repository
            .is_fund_usage_id_exist(id)
            .await?
            .ok_or(SagaError::NotFound {
                entity: "Penggunaan dana",
                id,
            })?;

        let revised = stored.revise(input)?;
        revised.ensure_consistent_honorarium_pairing()?;

        verify_fund_usage_master_data(&self.requester, &revised, run).await?;

        match (stored.is_honorarium(), revised.is_honorarium()) {
            (true, true) if stored.period() == revised.period() => {
                if stored.honorarium_key() != revised.honorarium_key() {
                    self.service.ensure_honorarium_not_reported(&revised).await?;
                }
                update_salary(&self.requester, &revised).await?;
                run.side_effect_completed(STEP_UPDATE_SALARY);
            }
            (true, true) => {
                self.service.ensure_honorarium_not_reported(&revised).await?;
                cancel_salary(&self.requester, &stored).await?;
                run.side_effect_completed(STEP_CANCEL_SALARY);
            }
            (true, false) => {
                cancel_salary(&self.requester, &stored).await?;
                run.side_effect_completed(STEP_CANCEL_SALARY);
            }
            (false, true) => {
                self.service.ensure_honorarium_not_reported(&revised).await?;
                pay_salary(&self.requester, &revised).await?;
                run.side_effect_completed(STEP_PAY_SALARY);
            }
            (false, false) => {
                tracing::debug!("no honorarium involved, payroll untouched");
            }
        }

        persist(run, self.repository.update_fund_usage(&revised)).await?;
        Ok(revised)
    }
}
