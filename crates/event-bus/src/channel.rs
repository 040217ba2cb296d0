use std::sync::Arc;

use serde::Serialize;

use crate::{ChannelError, Event, ListenerError, Reply, Result};

/// Callback invoked for every event published under the name it was
/// registered with.
pub type Listener = Arc<dyn Fn(&Event) -> std::result::Result<(), ListenerError> + Send + Sync>;

/// Handle for a single listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Creates a listener ID from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Core trait for event channel implementations.
///
/// Delivery is synchronous: `publish` returns only after every listener
/// registered under the event's name has run, in registration order.
/// Listeners may publish from inside their callback.
pub trait EventChannel: Send + Sync {
    /// Delivers an event to every listener registered under its name.
    ///
    /// A failing listener does not stop delivery to the others. If any
    /// listener failed, the first failure is returned after all have run.
    fn publish(&self, event: Event) -> Result<()>;

    /// Registers a listener for every future event published under `name`.
    fn subscribe(&self, name: &str, listener: Listener) -> ListenerId;

    /// Removes every listener registered under `name`.
    ///
    /// Returns the number of registrations removed. Calling it on a name with
    /// no listeners is a no-op.
    fn remove_specific_listener(&self, name: &str) -> usize;

    /// Removes a single registration. Returns false if it was already gone.
    fn unsubscribe(&self, name: &str, id: ListenerId) -> bool;

    /// Returns the number of active registrations under `name`.
    fn listener_count(&self, name: &str) -> usize;
}

/// Extension trait providing convenience methods for event channels.
pub trait EventChannelExt: EventChannel {
    /// Publishes a serializable payload under `name`, stamped with the
    /// current time.
    fn publish_payload<T: Serialize>(&self, name: &str, payload: &T) -> Result<()> {
        let event = Event::from_payload(name, payload)?;
        self.publish(event)
    }

    /// Registers a closure as a listener.
    fn subscribe_fn<F>(&self, name: &str, listener: F) -> ListenerId
    where
        F: Fn(&Event) -> std::result::Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe(name, Arc::new(listener))
    }

    /// Answers `request` by publishing `reply` under `response_name`,
    /// carrying the request's correlation id.
    fn reply(&self, request: &Event, response_name: &str, reply: &Reply) -> Result<()> {
        let mut event = Event::new(response_name, serde_json::to_value(reply)?);
        event.correlation_id = request.correlation_id;
        self.publish(event)
    }
}

// Blanket implementation for all EventChannel implementations
impl<T: EventChannel + ?Sized> EventChannelExt for T {}

impl From<ChannelError> for ListenerError {
    fn from(err: ChannelError) -> Self {
        ListenerError::new(err.to_string())
    }
}
