//! Orchestrators for the school finance commands.
//!
//! Each command is a saga of request/reply round-trips over the event
//! channel, followed by a single persistence call:
//! - [`ReportFundUsage`]: master data, honorarium uniqueness, payroll pay
//! - [`UpdateFundUsage`]: as above, with payroll update/cancel/pay chosen by
//!   what the record was and becomes
//! - [`UpdatePaymentProof`]: payment type rules and document replacement
//!
//! The first failure aborts the saga and reaches the caller unchanged.
//! Completed steps are not compensated.

pub mod commands;
pub mod config;
pub mod error;
pub mod messages;
pub mod responders;
pub mod state;
pub mod step;
pub mod steps;
pub mod telemetry;
pub mod topics;

pub use commands::{ReportFundUsage, UpdateFundUsage, UpdatePaymentProof};
pub use config::{LogFormat, SagaConfig};
pub use error::SagaError;
pub use messages::{MasterDataRequested, SalaryCancellation, SalaryPayment};
pub use responders::{
    InMemoryMasterDataResponder, InMemoryPayrollResponder, PayrollCall, ResponderMode,
};
pub use state::{SagaRun, SagaState};
pub use step::SagaStep;
pub use telemetry::init_tracing;
