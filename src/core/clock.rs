//! Clock collaborator supplying `TIME` values
//!
//! The core never generates timestamps itself; a [`Clock`] implementation
//! is handed to the logger and queried once per rendered line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source of the string substituted for the `TIME` token.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Timestamp format options for [`SystemClock`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime format string
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Wall-clock time rendered through a [`TimestampFormat`].
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    format: TimestampFormat,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(format: TimestampFormat) -> Self {
        Self { format }
    }
}

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        self.format.format(&Utc::now())
    }
}
