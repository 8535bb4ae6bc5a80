//! File logging example
//!
//! Demonstrates fan-out to console and file destinations and runtime
//! destination changes.
//!
//! Run with: cargo run --example file_logging

use std::collections::HashMap;
use template_logger_system::prelude::*;

fn main() -> Result<()> {
    println!("=== Template Logger System - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("template_logger_demo.log");
    println!("Writing to: {}\n", log_path.display());

    let mut logger = Logger::builder()
        .format(FormatTemplate::standard())
        .destination(Destination::Console)
        .destination(Destination::File)
        .levels(&[LogLevel::Info, LogLevel::Warn, LogLevel::Error])
        .sink(ConsoleSink::with_colors(false))
        .sink(FileSink::new(&log_path)?)
        .build();

    println!("1. Both destinations active:");
    let report = logger.info("written to console and file")?;
    println!("   delivered to {} sink(s)", report.delivered);

    println!("\n2. Console removed, file keeps receiving:");
    logger.remove_destination(Destination::Console);
    let report = logger.warn("file only")?;
    println!("   delivered to {} sink(s)", report.delivered);

    println!("\n3. Per-call dynamic values:");
    logger.add_destination(Destination::Console);
    let template = FormatTemplate::new(
        "[%{TIME}%] %{*TASK}% -> %{MESSAGE}%",
        HashMap::new(),
    )?;
    let index = logger.add_format(template);
    let values = HashMap::from([("TASK".to_string(), "cleanup".to_string())]);
    logger.log("finished", &values, index, LogLevel::Info)?;

    logger.flush()?;

    let written = std::fs::read_to_string(&log_path)?;
    println!("\nFile now contains {} line(s)", written.lines().count());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
