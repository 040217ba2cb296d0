//! Request/reply on top of the event channel.
//!
//! A round-trip works like this:
//!
//! ```text
//! Requester                  EventChannel                 Responder
//!     │ subscribe(Resp, waiter)    │                            │
//!     │──────────────────────────►│                            │
//!     │ publish(Req, corr=c)       │   listener(Req)            │
//!     │──────────────────────────►│──────────────────────────►│
//!     │                            │   publish(Resp, corr=c)    │
//!     │          waiter(Resp)      │◄──────────────────────────│
//!     │◄──────────────────────────│                            │
//!     │ unsubscribe(Resp, waiter)  │                            │
//! ```
//!
//! The waiter only accepts replies carrying its own correlation id and fires
//! at most once, so concurrent round-trips on the same response name cannot
//! see each other's replies.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::{CorrelationId, Event, EventChannel, ListenerId, Reply, RoundTripError};

/// Timeout applied to a round-trip when none is configured.
pub const DEFAULT_ROUND_TRIP_TIMEOUT: Duration = Duration::from_secs(5);

/// Issues request/reply round-trips over an event channel.
#[derive(Debug, Clone)]
pub struct Requester<C: EventChannel> {
    channel: C,
    timeout: Duration,
}

impl<C: EventChannel> Requester<C> {
    /// Creates a requester with the default timeout.
    pub fn new(channel: C) -> Self {
        Self::with_timeout(channel, DEFAULT_ROUND_TRIP_TIMEOUT)
    }

    /// Creates a requester that gives up after `timeout`.
    pub fn with_timeout(channel: C, timeout: Duration) -> Self {
        Self { channel, timeout }
    }

    /// Returns a reference to the underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Returns the round-trip timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Publishes `payload` under `request` and waits for the matching reply
    /// on `response`.
    ///
    /// Resolves with the success value, or fails with the responder's
    /// structured failure, a responder crash, or [`RoundTripError::NoResponder`]
    /// once the timeout elapses. Never retries.
    #[tracing::instrument(skip(self, payload), fields(correlation_id = tracing::field::Empty))]
    pub async fn request<P: Serialize + ?Sized>(
        &self,
        request: &str,
        response: &str,
        payload: &P,
    ) -> Result<Value, RoundTripError> {
        let started = Instant::now();
        metrics::counter!("round_trips_total").increment(1);

        let result = self.round_trip(request, response, payload).await;

        metrics::histogram!("round_trip_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        if let Err(err) = &result {
            metrics::counter!("round_trip_failures_total").increment(1);
            tracing::warn!(%request, error = %err, "round-trip failed");
        }
        result
    }

    async fn round_trip<P: Serialize + ?Sized>(
        &self,
        request: &str,
        response: &str,
        payload: &P,
    ) -> Result<Value, RoundTripError> {
        let correlation_id = CorrelationId::new();
        tracing::Span::current().record(
            "correlation_id",
            tracing::field::display(correlation_id),
        );

        let event = Event::new(request, serde_json::to_value(payload)?)
            .with_correlation(correlation_id);

        let (sender, mut receiver) = oneshot::channel::<Reply>();
        let waiter = self.register_waiter(response, correlation_id, sender);
        let _guard = WaiterGuard {
            channel: &self.channel,
            name: response,
            id: waiter,
        };

        if let Err(source) = self.channel.publish(event) {
            // Another listener may fail after ours already took the reply.
            // The responder acted, so the reply decides the outcome.
            match receiver.try_recv() {
                Ok(reply) => {
                    tracing::warn!(
                        %request,
                        %response,
                        error = %source,
                        "listener failed after the reply arrived"
                    );
                    return resolve(request, response, reply);
                }
                Err(_) => {
                    return Err(RoundTripError::Responder {
                        request: request.to_string(),
                        source,
                    });
                }
            }
        }

        let reply = match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) | Err(_) => {
                return Err(RoundTripError::NoResponder {
                    request: request.to_string(),
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
        };

        resolve(request, response, reply)
    }

    fn register_waiter(
        &self,
        response: &str,
        correlation_id: CorrelationId,
        sender: oneshot::Sender<Reply>,
    ) -> ListenerId {
        let slot = Mutex::new(Some(sender));
        self.channel.subscribe(
            response,
            Arc::new(move |event: &Event| {
                if event.correlation_id != Some(correlation_id) {
                    return Ok(());
                }
                let sender = slot.lock().expect("waiter slot lock poisoned").take();
                match sender {
                    Some(sender) => {
                        // The receiver is gone only if the round-trip already timed out.
                        let _ = sender.send(Reply::from_payload(event.payload.clone()));
                    }
                    None => {
                        tracing::warn!(
                            event = %event.name,
                            %correlation_id,
                            "duplicate reply ignored"
                        );
                    }
                }
                Ok(())
            }),
        )
    }
}

fn resolve(request: &str, response: &str, reply: Reply) -> Result<Value, RoundTripError> {
    tracing::debug!(%request, %response, "round-trip resolved");
    reply
        .into_result()
        .map_err(|failure| RoundTripError::Rejected {
            code: failure.code,
            message: failure.message,
        })
}

/// Removes the waiter registration when the round-trip ends, however it ends.
struct WaiterGuard<'a, C: EventChannel> {
    channel: &'a C,
    name: &'a str,
    id: ListenerId,
}

impl<C: EventChannel> Drop for WaiterGuard<'_, C> {
    fn drop(&mut self) {
        self.channel.unsubscribe(self.name, self.id);
    }
}
