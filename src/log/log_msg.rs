use crate::log::log_level::LogLevel;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the UNIX epoch, used to stamp log messages.
#[must_use]
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// A single log event: severity, timestamp, origin and text.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// The severity level of the log.
    pub level: LogLevel,
    /// The timestamp of the log event in milliseconds.
    pub ts_ms: u128,
    /// The actual content of the log message.
    pub text: String,
    /// The target source of the log, typically the static module path.
    pub target: &'static str,
}

impl LogMsg {
    /// Creates a new `LogMsg` stamped with the current time.
    pub fn new(level: LogLevel, text: impl Into<String>, target: &'static str) -> Self {
        Self {
            level,
            ts_ms: now_millis(),
            text: text.into(),
            target,
        }
    }
}
