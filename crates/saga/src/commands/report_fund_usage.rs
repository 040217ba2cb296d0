use std::sync::Arc;

use domain::{FundUsage, FundUsageInput, FundUsageRepository, FundUsageService};
use event_bus::{EventChannel, Requester};

use super::{persist, verify_fund_usage_master_data};
use crate::error::SagaError;
use crate::state::SagaRun;
use crate::steps::pay_salary;
use crate::topics::{SAGA_REPORT_FUND_USAGE, STEP_PAY_SALARY};

/// Reports a new fund usage.
///
/// Steps:
/// 1. "Aktivitas" and "Sub Aktivitas" must exist in master data
/// 2. Honorarium only: no report for the same sub-activity, recipient and
///    month may exist, then payroll pays the honorarium
/// 3. The report is stored
pub struct ReportFundUsage<C: EventChannel, R: FundUsageRepository> {
    requester: Requester<C>,
    repository: Arc<R>,
    service: FundUsageService<R>,
}

impl<C: EventChannel, R: FundUsageRepository> ReportFundUsage<C, R> {
    pub fn new(requester: Requester<C>, repository: Arc<R>) -> Self {
        let service = FundUsageService::new(Arc::clone(&repository));
        Self {
            requester,
            repository,
            service,
        }
    }

    /// Runs the saga and returns the stored report.
    #[tracing::instrument(
        skip_all,
        fields(saga_type = SAGA_REPORT_FUND_USAGE, fund_usage_id = tracing::field::Empty)
    )]
    pub async fn execute(&self, input: FundUsageInput) -> Result<FundUsage, SagaError> {
        let mut run = SagaRun::start(SAGA_REPORT_FUND_USAGE);
        let result = self.run(input, &mut run).await;
        run.finish(&result);
        result
    }

    async fn run(&self, input: FundUsageInput, run: &mut SagaRun) -> Result<FundUsage, SagaError> {
        let fund_usage = FundUsage::report(input)?;
        tracing::Span::current().record(
            "fund_usage_id",
            tracing::field::display(fund_usage.id()),
        );

        verify_fund_usage_master_data(&self.requester, &fund_usage, run).await?;

        if fund_usage.is_honorarium() {
            self.service
                .ensure_honorarium_not_reported(&fund_usage)
                .await?;
            pay_salary(&self.requester, &fund_usage).await?;
            run.side_effect_completed(STEP_PAY_SALARY);
        }

        persist(run, self.repository.add_fund_usage(&fund_usage)).await?;
        Ok(fund_usage)
    }
}
