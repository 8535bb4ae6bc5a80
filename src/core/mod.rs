//! Core logger types and traits

pub mod clock;
pub mod error;
pub mod level_flags;
pub mod log_level;
pub mod logger;
pub mod sink;
pub mod template;
pub mod token;

pub use clock::{Clock, SystemClock, TimestampFormat};
pub use error::{LoggerError, Result};
pub use level_flags::{FlagValue, Flags, LogLevelFlags};
pub use log_level::LogLevel;
pub use logger::{presets, Logger, LoggerBuilder};
pub use sink::{Destination, DispatchReport, Sink, SinkFailure};
pub use template::{FormatTemplate, DEFAULT_FORMAT_STRING};
pub use token::{
    classify, is_reserved, TokenSets, LEVEL_TOKEN, MESSAGE_TOKEN, RESERVED_TOKENS, TIME_TOKEN,
};
