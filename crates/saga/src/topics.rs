//! Event names, saga types and step names.

/// Request for the master-data records of one type.
pub const MASTER_DATA_REQUESTED: &str = "MasterDataRequested";
/// Reply carrying the requested master-data records.
pub const MASTER_DATA_RETRIEVED: &str = "MasterDataRetrieved";

pub const PAY_EMPLOYEE_SALARY: &str = "PayEmployeeSalary";
pub const EMPLOYEE_SALARY_PAID: &str = "EmployeeSalaryPaid";

pub const UPDATE_EMPLOYEE_SALARY: &str = "UpdateEmployeeSalary";
pub const EMPLOYEE_SALARY_UPDATED: &str = "EmployeeSalaryUpdated";

pub const CANCEL_EMPLOYEE_SALARY: &str = "CancelEmployeeSalary";
pub const EMPLOYEE_SALARY_DELETED: &str = "EmployeeSalaryDeleted";

pub const SAGA_REPORT_FUND_USAGE: &str = "ReportFundUsage";
pub const SAGA_UPDATE_FUND_USAGE: &str = "UpdateFundUsage";
pub const SAGA_UPDATE_PAYMENT_PROOF: &str = "UpdatePaymentProof";

/// Step name: pay the honorarium through payroll.
pub const STEP_PAY_SALARY: &str = "pay_salary";
/// Step name: change an honorarium already paid this month.
pub const STEP_UPDATE_SALARY: &str = "update_salary";
/// Step name: withdraw a paid honorarium.
pub const STEP_CANCEL_SALARY: &str = "cancel_salary";
/// Step name: store the new payment proof document.
pub const STEP_UPLOAD_FILE: &str = "upload_file";
/// Step name: remove the document the new upload replaced.
pub const STEP_DELETE_OLD_FILE: &str = "delete_old_file";
