//! In-process event channel with request/reply correlation.
//!
//! The [`EventChannel`] delivers named events synchronously to every listener
//! registered under the name. [`Requester`] layers request/reply on top of it:
//! each round-trip publishes a request tagged with a fresh [`CorrelationId`]
//! and waits for the [`Reply`] carrying the same id.

pub mod channel;
pub mod correlation;
pub mod error;
pub mod event;
pub mod memory;

pub use channel::{EventChannel, EventChannelExt, Listener, ListenerId};
pub use correlation::{DEFAULT_ROUND_TRIP_TIMEOUT, Requester};
pub use error::{ChannelError, ListenerError, Result, RoundTripError};
pub use event::{CorrelationId, Event, EventId, Failure, Reply};
pub use memory::{InProcessEventChannel, WeakEventChannel};
