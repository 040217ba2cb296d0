//! A single request/reply step of a saga.

use event_bus::{EventChannel, Requester};
use serde::Serialize;
use serde_json::Value;

use crate::error::SagaError;

/// One round-trip plus the check applied to its successful reply.
///
/// The check may still fail the step with a business error although the
/// transport succeeded.
#[derive(Debug, Clone)]
pub struct SagaStep<P> {
    name: &'static str,
    request: &'static str,
    response: &'static str,
    payload: P,
}

impl<P: Serialize> SagaStep<P> {
    pub fn new(name: &'static str, request: &'static str, response: &'static str, payload: P) -> Self {
        Self {
            name,
            request,
            response,
            payload,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the round-trip and hands the success value to `check`.
    #[tracing::instrument(
        name = "saga_step",
        skip_all,
        fields(step = self.name, request = self.request)
    )]
    pub async fn run<C, T, F>(self, requester: &Requester<C>, check: F) -> Result<T, SagaError>
    where
        C: EventChannel,
        F: FnOnce(Value) -> Result<T, SagaError>,
    {
        tracing::info!("saga step started");

        let outcome = match requester
            .request(self.request, self.response, &self.payload)
            .await
        {
            Ok(value) => check(value),
            Err(err) => Err(err.into()),
        };

        match &outcome {
            Ok(_) => tracing::info!("saga step completed"),
            Err(err) => tracing::warn!(code = %err.code(), error = %err, "saga step failed"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use common::ErrorCode;
    use domain::DomainError;
    use event_bus::{EventChannelExt, InProcessEventChannel, ListenerError, Reply};
    use serde_json::json;

    use super::*;

    fn echo(channel: &InProcessEventChannel) {
        let weak = channel.downgrade();
        channel.subscribe_fn("Ask", move |event| {
            let channel = weak.upgrade().ok_or_else(|| ListenerError::new("gone"))?;
            channel.reply(event, "Answered", &Reply::success(&event.payload)?)?;
            Ok(())
        });
    }

    #[tokio::test]
    async fn test_check_receives_success_value() {
        let channel = InProcessEventChannel::new();
        echo(&channel);
        let requester = Requester::new(channel);

        let step = SagaStep::new("echo", "Ask", "Answered", json!({"n": 2}));
        assert_eq!(step.name(), "echo");
        let n = step
            .run(&requester, |value| {
                value["n"]
                    .as_i64()
                    .ok_or_else(|| SagaError::UnexpectedReply {
                        step: "echo",
                        reason: "missing n".to_string(),
                    })
            })
            .await
            .unwrap();
        assert_eq!(n, 2);
    }

    #[tokio::test]
    async fn test_check_can_reject_a_successful_reply() {
        let channel = InProcessEventChannel::new();
        echo(&channel);
        let requester = Requester::new(channel);

        let err = SagaStep::new("echo", "Ask", "Answered", json!("HRD"))
            .run(&requester, |_| -> Result<(), SagaError> {
                Err(DomainError::MissingField { field: "penerima" }.into())
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[tokio::test]
    async fn test_transport_failure_skips_check() {
        let channel = InProcessEventChannel::new();
        let weak = channel.downgrade();
        channel.subscribe_fn("Ask", move |event| {
            let channel = weak.upgrade().ok_or_else(|| ListenerError::new("gone"))?;
            channel.reply(
                event,
                "Answered",
                &Reply::failure(ErrorCode::NotFound, "tidak ada"),
            )?;
            Ok(())
        });
        let requester = Requester::new(channel);

        let err = SagaStep::new("echo", "Ask", "Answered", json!({}))
            .run(&requester, |_| -> Result<(), SagaError> {
                panic!("check must not run")
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "tidak ada");
    }
}
