//! Typed steps shared by the orchestrators.

mod master_data;
mod payroll;

pub use master_data::master_data_step;
pub use payroll::{cancel_salary, pay_salary, update_salary};
