//! # Template Logger System
//!
//! A template-driven Rust logging core with validated placeholder formats,
//! level flag filtering, and multiple output destinations.
//!
//! ## Features
//!
//! - **Validated Formats**: every format string is classified and checked
//!   before a message can be rendered through it
//! - **Placeholder Grammar**: static, dynamic, and reserved tokens with
//!   escape and override markers
//! - **Level Flags**: exact bit-set filtering over severities
//! - **Multiple Destinations**: console and file sinks, extensible through
//!   the `Sink` trait

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        presets, Clock, Destination, DispatchReport, FlagValue, Flags, FormatTemplate,
        LogLevel, LogLevelFlags, Logger, LoggerBuilder, LoggerError, Result, Sink,
        SinkFailure, SystemClock, TimestampFormat, DEFAULT_FORMAT_STRING,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

pub use crate::core::{
    classify, is_reserved, presets, Clock, Destination, DispatchReport, FlagValue, Flags,
    FormatTemplate, LogLevel, LogLevelFlags, Logger, LoggerBuilder, LoggerError, Result,
    Sink, SinkFailure, SystemClock, TimestampFormat, TokenSets, DEFAULT_FORMAT_STRING,
    LEVEL_TOKEN, MESSAGE_TOKEN, RESERVED_TOKENS, TIME_TOKEN,
};

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
