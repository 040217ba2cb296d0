use chrono::{DateTime, Utc};
use common::ErrorCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ties a reply to the request that asked for it.
///
/// A fresh id is minted for every round-trip; responders copy it from the
/// request onto their reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Creates a new random correlation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a correlation ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable event delivered through the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The event name listeners are registered under (e.g., "MasterDataRequested").
    pub name: String,

    /// Round-trip this event belongs to, if any.
    pub correlation_id: Option<CorrelationId>,

    /// The event payload as JSON.
    pub payload: Value,

    /// When the event was published.
    pub occurred_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event stamped with the current time.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            event_id: EventId::new(),
            name: name.into(),
            correlation_id: None,
            payload,
            occurred_at: Utc::now(),
        }
    }

    /// Creates an event from a serializable payload.
    pub fn from_payload<T: Serialize>(
        name: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(name, serde_json::to_value(payload)?))
    }

    /// Attaches a correlation id.
    pub fn with_correlation(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Decodes the payload into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

/// Structured failure carried on a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: u16,
    pub message: String,
}

impl Failure {
    /// Creates a failure with the given status code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.status(),
            message: message.into(),
        }
    }
}

/// Payload of a response event: exactly one of success or failure.
///
/// On the wire this is `{"status":"success","data":...}` or
/// `{"status":"error","code":...,"message":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Reply {
    Success { data: Value },
    Error(Failure),
}

impl Reply {
    /// Creates a success reply from a serializable value.
    pub fn success<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Reply::Success {
            data: serde_json::to_value(data)?,
        })
    }

    /// Creates a failure reply.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Reply::Error(Failure::new(code, message))
    }

    /// Interprets a raw response payload.
    ///
    /// Tagged replies are taken as they are. An untagged payload whose
    /// `status` is `"error"` is a failure; any other untagged payload is the
    /// success value itself, which keeps responders that publish bare values
    /// working.
    pub fn from_payload(payload: Value) -> Self {
        if let Ok(reply) = Reply::deserialize(&payload) {
            return reply;
        }
        if payload.get("status").and_then(Value::as_str) == Some("error") {
            let code = payload
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(ErrorCode::InternalServerError.status());
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("responder reported an error")
                .to_string();
            return Reply::Error(Failure { code, message });
        }
        Reply::Success { data: payload }
    }

    /// Returns true for failure replies.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Splits the reply into a standard result.
    pub fn into_result(self) -> Result<Value, Failure> {
        match self {
            Reply::Success { data } => Ok(data),
            Reply::Error(failure) => Err(failure),
        }
    }
}
