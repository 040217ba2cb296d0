//! Orchestrator configuration loaded from environment variables.

use std::time::Duration;

use event_bus::{DEFAULT_ROUND_TRIP_TIMEOUT, EventChannel, Requester};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Orchestrator configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `ROUND_TRIP_TIMEOUT_MS`: how long a step waits for its reply (default: `5000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `"json"` for structured output, anything else for text
#[derive(Debug, Clone)]
pub struct SagaConfig {
    pub round_trip_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl SagaConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            round_trip_timeout: lookup("ROUND_TRIP_TIMEOUT_MS")
                .and_then(|ms| ms.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.round_trip_timeout),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),
        }
    }

    /// Builds a requester that uses the configured timeout.
    pub fn requester<C: EventChannel>(&self, channel: C) -> Requester<C> {
        Requester::with_timeout(channel, self.round_trip_timeout)
    }
}

impl Default for SagaConfig {
    fn default() -> Self {
        Self {
            round_trip_timeout: DEFAULT_ROUND_TRIP_TIMEOUT,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
