//! The orchestrators, one per command.
//!
//! Each `execute()` runs its steps strictly in order, stops at the first
//! failure and returns it unchanged. Nothing is retried or compensated; a
//! persistence failure after a payroll or storage side effect is logged and
//! counted instead.

mod report_fund_usage;
mod update_fund_usage;
mod update_payment_proof;

use std::future::Future;

use domain::{FundUsage, MasterDataType, RepositoryError};
use event_bus::{EventChannel, Requester};

use crate::error::SagaError;
use crate::state::SagaRun;
use crate::steps::master_data_step;

pub use report_fund_usage::ReportFundUsage;
pub use update_fund_usage::UpdateFundUsage;
pub use update_payment_proof::UpdatePaymentProof;

/// Runs the "Aktivitas" then "Sub Aktivitas" master-data steps.
async fn verify_fund_usage_master_data<C: EventChannel>(
    requester: &Requester<C>,
    fund_usage: &FundUsage,
    run: &mut SagaRun,
) -> Result<(), SagaError> {
    master_data_step(requester, MasterDataType::Activity, |records| {
        fund_usage.verify_activity_master_data(records)
    })
    .await?;
    run.step_completed(MasterDataType::Activity.as_str());

    master_data_step(requester, MasterDataType::SubActivity, |records| {
        fund_usage.verify_sub_activity_master_data(records)
    })
    .await?;
    run.step_completed(MasterDataType::SubActivity.as_str());
    Ok(())
}

/// Awaits the final write, reporting earlier side effects if it fails.
async fn persist<F>(run: &SagaRun, write: F) -> Result<(), SagaError>
where
    F: Future<Output = Result<(), RepositoryError>>,
{
    write.await.map_err(|err| {
        let err = SagaError::from(err);
        run.report_uncompensated(&err);
        err
    })
}
