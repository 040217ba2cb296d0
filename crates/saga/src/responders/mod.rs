//! In-memory stand-ins for the master-data and payroll modules.
//!
//! They subscribe to the request events on an [`InProcessEventChannel`] and
//! answer synchronously, the way the real modules do when they share the
//! channel with the orchestrators.
//!
//! [`InProcessEventChannel`]: event_bus::InProcessEventChannel

mod master_data;
mod payroll;

use common::ErrorCode;
use event_bus::Failure;

pub use master_data::InMemoryMasterDataResponder;
pub use payroll::{InMemoryPayrollResponder, PayrollCall};

/// How an in-memory responder answers the next requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResponderMode {
    /// Reply with a success payload.
    #[default]
    Answer,

    /// Reply with a structured failure.
    Reject(Failure),

    /// Fail inside the listener without replying.
    Crash,

    /// Do nothing, leaving the requester to time out.
    Silent,
}

impl ResponderMode {
    pub fn reject(code: ErrorCode, message: impl Into<String>) -> Self {
        ResponderMode::Reject(Failure::new(code, message))
    }
}
