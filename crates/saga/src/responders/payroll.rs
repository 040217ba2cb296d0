use std::sync::{Arc, RwLock};

use event_bus::{Event, EventChannelExt, InProcessEventChannel, ListenerError, Reply};
use serde::de::DeserializeOwned;

use super::ResponderMode;
use crate::messages::{SalaryCancellation, SalaryPayment};
use crate::topics::{
    CANCEL_EMPLOYEE_SALARY, EMPLOYEE_SALARY_DELETED, EMPLOYEE_SALARY_PAID,
    EMPLOYEE_SALARY_UPDATED, PAY_EMPLOYEE_SALARY, UPDATE_EMPLOYEE_SALARY,
};

/// A request the payroll responder received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayrollCall {
    Pay(SalaryPayment),
    Update(SalaryPayment),
    Cancel(SalaryCancellation),
}

#[derive(Debug, Default)]
struct PayrollState {
    calls: Vec<PayrollCall>,
    mode: ResponderMode,
}

/// Answers the three salary requests with `"success"`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayrollResponder {
    state: Arc<RwLock<PayrollState>>,
}

impl InMemoryPayrollResponder {
    /// Creates a responder and subscribes it to `channel`.
    pub fn register(channel: &InProcessEventChannel) -> Self {
        let responder = Self::default();
        responder.answer(channel, PAY_EMPLOYEE_SALARY, EMPLOYEE_SALARY_PAID, PayrollCall::Pay);
        responder.answer(
            channel,
            UPDATE_EMPLOYEE_SALARY,
            EMPLOYEE_SALARY_UPDATED,
            PayrollCall::Update,
        );
        responder.answer(
            channel,
            CANCEL_EMPLOYEE_SALARY,
            EMPLOYEE_SALARY_DELETED,
            PayrollCall::Cancel,
        );
        responder
    }

    fn answer<P, F>(
        &self,
        channel: &InProcessEventChannel,
        request: &'static str,
        response: &'static str,
        record: F,
    ) where
        P: DeserializeOwned + 'static,
        F: Fn(P) -> PayrollCall + Send + Sync + 'static,
    {
        let state = Arc::clone(&self.state);
        let weak = channel.downgrade();

        channel.subscribe_fn(request, move |event: &Event| {
            let payload: P = event.decode()?;

            let reply = {
                let mut state = state.write().unwrap();
                state.calls.push(record(payload));
                match &state.mode {
                    ResponderMode::Answer => Reply::success(&"success")?,
                    ResponderMode::Reject(failure) => Reply::Error(failure.clone()),
                    ResponderMode::Crash => {
                        return Err(ListenerError::new("payroll ledger unavailable"));
                    }
                    ResponderMode::Silent => return Ok(()),
                }
            };

            let channel = weak
                .upgrade()
                .ok_or_else(|| ListenerError::new("event channel dropped"))?;
            channel.reply(event, response, &reply)?;
            Ok(())
        });
    }

    pub fn set_mode(&self, mode: ResponderMode) {
        self.state.write().unwrap().mode = mode;
    }

    /// Every request received, in order.
    pub fn calls(&self) -> Vec<PayrollCall> {
        self.state.read().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls.len()
    }

    pub fn pay_count(&self) -> usize {
        self.count(|call| matches!(call, PayrollCall::Pay(_)))
    }

    pub fn update_count(&self) -> usize {
        self.count(|call| matches!(call, PayrollCall::Update(_)))
    }

    pub fn cancel_count(&self) -> usize {
        self.count(|call| matches!(call, PayrollCall::Cancel(_)))
    }

    fn count(&self, filter: impl Fn(&PayrollCall) -> bool) -> usize {
        self.state
            .read()
            .unwrap()
            .calls
            .iter()
            .filter(|call| filter(call))
            .count()
    }
}
