use domain::FundUsage;
use event_bus::{EventChannel, Requester};
use serde_json::Value;

use crate::error::SagaError;
use crate::messages::{SalaryCancellation, SalaryPayment};
use crate::step::SagaStep;
use crate::topics::{
    CANCEL_EMPLOYEE_SALARY, EMPLOYEE_SALARY_DELETED, EMPLOYEE_SALARY_PAID,
    EMPLOYEE_SALARY_UPDATED, PAY_EMPLOYEE_SALARY, STEP_CANCEL_SALARY, STEP_PAY_SALARY,
    STEP_UPDATE_SALARY, UPDATE_EMPLOYEE_SALARY,
};

/// Asks payroll to pay the honorarium of `fund_usage`.
pub async fn pay_salary<C: EventChannel>(
    requester: &Requester<C>,
    fund_usage: &FundUsage,
) -> Result<(), SagaError> {
    SagaStep::new(
        STEP_PAY_SALARY,
        PAY_EMPLOYEE_SALARY,
        EMPLOYEE_SALARY_PAID,
        SalaryPayment::for_fund_usage(fund_usage),
    )
    .run(requester, acknowledged)
    .await
}

/// Asks payroll to replace the honorarium line of `fund_usage` in its month.
pub async fn update_salary<C: EventChannel>(
    requester: &Requester<C>,
    fund_usage: &FundUsage,
) -> Result<(), SagaError> {
    SagaStep::new(
        STEP_UPDATE_SALARY,
        UPDATE_EMPLOYEE_SALARY,
        EMPLOYEE_SALARY_UPDATED,
        SalaryPayment::for_fund_usage(fund_usage),
    )
    .run(requester, acknowledged)
    .await
}

/// Asks payroll to withdraw the honorarium line of `fund_usage` as stored.
pub async fn cancel_salary<C: EventChannel>(
    requester: &Requester<C>,
    fund_usage: &FundUsage,
) -> Result<(), SagaError> {
    SagaStep::new(
        STEP_CANCEL_SALARY,
        CANCEL_EMPLOYEE_SALARY,
        EMPLOYEE_SALARY_DELETED,
        SalaryCancellation::for_fund_usage(fund_usage),
    )
    .run(requester, acknowledged)
    .await
}

// Payroll answers "success"; any other success value is accepted as well.
fn acknowledged(value: Value) -> Result<(), SagaError> {
    if value.as_str() != Some("success") {
        tracing::debug!(reply = %value, "payroll acknowledged with an unusual value");
    }
    Ok(())
}
