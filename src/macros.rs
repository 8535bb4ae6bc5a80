//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They dispatch
//! through format index 0 with no dynamic values; calls that need another
//! format or per-call token values go through [`Logger::log`](crate::Logger::log)
//! directly.
//!
//! # Examples
//!
//! ```
//! use template_logger_system::prelude::*;
//! use template_logger_system::info;
//!
//! let logger = presets::simple_logger();
//!
//! // Basic logging
//! let _ = info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! let _ = info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use template_logger_system::prelude::*;
/// # let logger = presets::simple_logger();
/// use template_logger_system::log;
/// let _ = log!(logger, LogLevel::Info, "Simple message");
/// let _ = log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            &format!($($arg)+),
            &::std::collections::HashMap::new(),
            0,
            $level,
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use template_logger_system::prelude::*;
/// # let logger = presets::simple_logger();
/// use template_logger_system::info;
/// let _ = info!(logger, "Application started");
/// let _ = info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
