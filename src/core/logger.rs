//! Logger configuration and dispatch
//!
//! A [`Logger`] aggregates format templates, active destinations, a level
//! flag set, the registered sinks, and the clock collaborator. All state is
//! behind `parking_lot` locks; the dispatch path copies the rendered line
//! out of the configuration locks before any sink is called, so a slow sink
//! never blocks configuration access.

use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap};

use super::clock::{Clock, SystemClock};
use super::error::{LoggerError, Result};
use super::level_flags::LogLevelFlags;
use super::log_level::LogLevel;
use super::sink::{Destination, DispatchReport, Sink, SinkFailure};
use super::template::FormatTemplate;

pub struct Logger {
    formats: RwLock<Vec<FormatTemplate>>,
    destinations: RwLock<BTreeSet<Destination>>,
    level_flags: RwLock<LogLevelFlags>,
    sinks: Mutex<Vec<Box<dyn Sink>>>,
    clock: Box<dyn Clock>,
}

impl Logger {
    /// Create an empty configuration: no formats, no destinations, no
    /// enabled levels, system wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock::new()))
    }

    /// Create an empty configuration with a custom clock collaborator.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            formats: RwLock::new(Vec::new()),
            destinations: RwLock::new(BTreeSet::new()),
            level_flags: RwLock::new(LogLevelFlags::empty()),
            sinks: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Append a format template and return its index.
    ///
    /// Templates are valid by construction, so registration cannot fail;
    /// the index is stable until a lower-indexed format is removed.
    pub fn add_format(&mut self, template: FormatTemplate) -> usize {
        let mut formats = self.formats.write();
        formats.push(template);
        formats.len() - 1
    }

    /// Replace the format at `index`.
    pub fn set_format(&mut self, index: usize, template: FormatTemplate) -> Result<()> {
        let mut formats = self.formats.write();
        let count = formats.len();
        let slot = formats
            .get_mut(index)
            .ok_or_else(|| LoggerError::bad_index(index, count))?;
        *slot = template;
        Ok(())
    }

    /// Remove and return the format at `index`.
    pub fn remove_format(&mut self, index: usize) -> Result<FormatTemplate> {
        let mut formats = self.formats.write();
        if index >= formats.len() {
            return Err(LoggerError::bad_index(index, formats.len()));
        }
        Ok(formats.remove(index))
    }

    /// Update the bound value of a static token in the format at `index`.
    ///
    /// Returns `Ok(false)` when the format has no such static token.
    pub fn update_format_parameter(
        &mut self,
        index: usize,
        token: &str,
        value: impl Into<String>,
    ) -> Result<bool> {
        let mut formats = self.formats.write();
        let count = formats.len();
        let template = formats
            .get_mut(index)
            .ok_or_else(|| LoggerError::bad_index(index, count))?;
        Ok(template.set_static_token(token, value))
    }

    pub fn format_count(&self) -> usize {
        self.formats.read().len()
    }

    /// Activate a destination. Adding an active destination is a no-op.
    pub fn add_destination(&mut self, destination: Destination) {
        self.destinations.write().insert(destination);
    }

    /// Deactivate a destination. Removing an inactive destination is a
    /// no-op.
    pub fn remove_destination(&mut self, destination: Destination) {
        self.destinations.write().remove(&destination);
    }

    pub fn has_destination(&self, destination: Destination) -> bool {
        self.destinations.read().contains(&destination)
    }

    /// Replace the level flag set.
    pub fn set_level_flags(&mut self, flags: LogLevelFlags) {
        *self.level_flags.write() = flags;
    }

    /// Replace the level flag set from a list of levels.
    pub fn set_levels(&mut self, levels: &[LogLevel]) {
        self.set_level_flags(LogLevelFlags::from_flags(levels));
    }

    /// Union additional flags into the level flag set.
    pub fn update_level_flags(&mut self, flags: LogLevelFlags) {
        self.level_flags.write().update(flags);
    }

    /// Enable or disable a single level.
    pub fn set_level_flag(&mut self, level: LogLevel, enable: bool) {
        self.level_flags.write().set(level, enable);
    }

    pub fn level_flags(&self) -> LogLevelFlags {
        *self.level_flags.read()
    }

    /// Register a sink collaborator. Only sinks whose kind is in the
    /// active destination set receive dispatched lines.
    pub fn add_sink(&mut self, sink: Box<dyn Sink>) {
        self.sinks.lock().push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    /// Render and dispatch one message.
    ///
    /// A level outside the flag set suppresses the message silently (an
    /// expected outcome, reported but not an error). An out-of-range
    /// `format_index` fails with [`LoggerError::BadFormatIndex`] before any
    /// sink is touched. Otherwise the rendered line goes to every
    /// registered sink whose kind is an active destination; per-sink write
    /// failures are collected in the report and do not abort delivery to
    /// the remaining sinks.
    pub fn log(
        &self,
        message: &str,
        dynamic_values: &HashMap<String, String>,
        format_index: usize,
        level: LogLevel,
    ) -> Result<DispatchReport> {
        if !self.level_flags.read().contains(level) {
            return Ok(DispatchReport {
                suppressed: true,
                ..Default::default()
            });
        }

        // Render while holding only the format read lock; the sink
        // hand-off below works from the copied line.
        let rendered = {
            let formats = self.formats.read();
            let template = formats
                .get(format_index)
                .ok_or_else(|| LoggerError::bad_index(format_index, formats.len()))?;
            template.render(message, level, dynamic_values, self.clock.as_ref())?
        };
        let active = self.destinations.read().clone();

        let mut report = DispatchReport::default();
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            if !active.contains(&sink.kind()) {
                continue;
            }
            match sink.write(&rendered, level) {
                Ok(()) => report.delivered += 1,
                Err(error) => report.failures.push(SinkFailure {
                    sink: sink.name().to_string(),
                    destination: sink.kind(),
                    error,
                }),
            }
        }

        Ok(report)
    }

    /// Flush every registered sink.
    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) -> Result<DispatchReport> {
        self.log(message.as_ref(), &HashMap::new(), 0, LogLevel::Trace)
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) -> Result<DispatchReport> {
        self.log(message.as_ref(), &HashMap::new(), 0, LogLevel::Debug)
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) -> Result<DispatchReport> {
        self.log(message.as_ref(), &HashMap::new(), 0, LogLevel::Info)
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) -> Result<DispatchReport> {
        self.log(message.as_ref(), &HashMap::new(), 0, LogLevel::Warn)
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) -> Result<DispatchReport> {
        self.log(message.as_ref(), &HashMap::new(), 0, LogLevel::Error)
    }

    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) -> Result<DispatchReport> {
        self.log(message.as_ref(), &HashMap::new(), 0, LogLevel::Fatal)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use template_logger_system::prelude::*;
///
/// let logger = Logger::builder()
///     .format(FormatTemplate::standard())
///     .destination(Destination::Console)
///     .levels(&[LogLevel::Info, LogLevel::Warn, LogLevel::Error])
///     .build();
/// assert_eq!(logger.format_count(), 1);
/// ```
pub struct LoggerBuilder {
    formats: Vec<FormatTemplate>,
    destinations: BTreeSet<Destination>,
    level_flags: LogLevelFlags,
    sinks: Vec<Box<dyn Sink>>,
    clock: Option<Box<dyn Clock>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
            destinations: BTreeSet::new(),
            level_flags: LogLevelFlags::empty(),
            sinks: Vec::new(),
            clock: None,
        }
    }

    /// Append a format template.
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, template: FormatTemplate) -> Self {
        self.formats.push(template);
        self
    }

    /// Activate a destination.
    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destinations.insert(destination);
        self
    }

    /// Enable the given levels (union with previously enabled ones).
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: &[LogLevel]) -> Self {
        self.level_flags.update(LogLevelFlags::from_flags(levels));
        self
    }

    /// Replace the level flag set.
    #[must_use = "builder methods return a new value"]
    pub fn level_flags(mut self, flags: LogLevelFlags) -> Self {
        self.level_flags = flags;
        self
    }

    /// Register a sink.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Use a custom clock collaborator.
    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Build the logger.
    pub fn build(self) -> Logger {
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));
        let mut logger = Logger::with_clock(clock);
        for template in self.formats {
            logger.add_format(template);
        }
        for destination in self.destinations {
            logger.add_destination(destination);
        }
        logger.set_level_flags(self.level_flags);
        for sink in self.sinks {
            logger.add_sink(sink);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for [`Logger`]
    ///
    /// # Example
    /// ```
    /// use template_logger_system::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .format(FormatTemplate::standard())
    ///     .levels(&[LogLevel::Debug])
    ///     .build();
    /// assert!(logger.level_flags().contains(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

/// Preconfigured logger constructors.
///
/// There is exactly one configuration shape, so presets are plain
/// functions returning a fully configured [`Logger`].
pub mod presets {
    use std::collections::HashMap;

    use super::{Logger, LoggerBuilder};
    use crate::core::level_flags::LogLevelFlags;
    use crate::core::log_level::LogLevel;
    use crate::core::sink::Destination;
    use crate::core::template::FormatTemplate;

    /// Format used by [`error_logger`]: the failing call site is supplied
    /// per call through the dynamic `FUNCTION` token.
    pub const ERROR_LOGGER_FORMAT_STRING: &str =
        "[ErrorHandler][%{LEVEL}%][%{TIME}%]:{%{*FUNCTION}%}->%{MESSAGE}%";

    /// Console logger with the standard format and every severity enabled.
    pub fn simple_logger() -> Logger {
        let builder = Logger::builder()
            .format(FormatTemplate::standard())
            .destination(Destination::Console)
            .level_flags(LogLevelFlags::all_severities());
        attach_console(builder).build()
    }

    /// Console logger for error reporting: `Error` and `Fatal` only.
    pub fn error_logger() -> Logger {
        let template = FormatTemplate::new(ERROR_LOGGER_FORMAT_STRING, HashMap::new())
            .expect("preset format is valid");
        let builder = Logger::builder()
            .format(template)
            .destination(Destination::Console)
            .levels(&[LogLevel::Error, LogLevel::Fatal]);
        attach_console(builder).build()
    }

    #[cfg(feature = "console")]
    fn attach_console(builder: LoggerBuilder) -> LoggerBuilder {
        builder.sink(crate::sinks::ConsoleSink::new())
    }

    #[cfg(not(feature = "console"))]
    fn attach_console(builder: LoggerBuilder) -> LoggerBuilder {
        builder
    }
}
