//! Console sink implementation

use crate::core::{Destination, LogLevel, Result, Sink};
use colored::Colorize;

/// Writes rendered lines to the terminal, `Error` and `Fatal` to stderr,
/// everything else to stdout.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> Destination {
        Destination::Console
    }

    fn write(&mut self, rendered: &str, level: LogLevel) -> Result<()> {
        let line = if self.use_colors {
            rendered.color(level.color_code()).to_string()
        } else {
            rendered.to_string()
        };

        match level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Both streams are written to, flush both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_kind_and_name() {
        let sink = ConsoleSink::new();
        assert_eq!(sink.kind(), Destination::Console);
        assert_eq!(sink.name(), "console");
    }

    #[test]
    fn test_console_sink_writes_without_error() {
        let mut sink = ConsoleSink::with_colors(false);
        sink.write("plain line", LogLevel::Info).expect("stdout write");
        sink.write("error line", LogLevel::Error).expect("stderr write");
        sink.flush().expect("flush");
    }
}
