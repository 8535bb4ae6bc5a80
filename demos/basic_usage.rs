//! Basic logger usage example
//!
//! Demonstrates format template validation, level flag filtering, and
//! console dispatch.
//!
//! Run with: cargo run --example basic_usage

use std::collections::HashMap;
use template_logger_system::prelude::*;

fn main() -> Result<()> {
    println!("=== Template Logger System - Basic Usage Example ===\n");

    // The preset logger: standard format, console destination, all levels
    let mut logger = presets::simple_logger();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message")?;
    logger.debug("This is a debug message")?;
    logger.info("This is an info message")?;
    logger.warn("This is a warning message")?;
    logger.error("This is an error message")?;
    logger.fatal("This is a fatal message")?;

    println!("\n2. Level flags filter exactly, not by threshold:");
    logger.set_levels(&[LogLevel::Debug, LogLevel::Fatal]);
    logger.info("Info message (suppressed)")?;
    logger.debug("Debug message (visible)")?;
    logger.fatal("Fatal message (visible)")?;

    println!("\n3. A custom format with static and dynamic tokens:");
    let template = FormatTemplate::new(
        "%{APP}% [%{LEVEL}%] %{*USER}%: %{MESSAGE}%",
        HashMap::from([("APP".to_string(), "demo".to_string())]),
    )?;
    let index = logger.add_format(template);
    logger.set_levels(&[LogLevel::Info]);

    let values = HashMap::from([("USER".to_string(), "alice".to_string())]);
    logger.log("logged in", &values, index, LogLevel::Info)?;

    println!("\n4. Invalid formats are rejected before use:");
    match FormatTemplate::new("[%{LEVEL}%] no message token", HashMap::new()) {
        Ok(_) => println!("   unexpected: format accepted"),
        Err(err) => println!("   rejected: {}", err),
    }
    match FormatTemplate::new("%{MESSAGE}% %{MESSAGE}%", HashMap::new()) {
        Ok(_) => println!("   unexpected: format accepted"),
        Err(err) => println!("   rejected: {}", err),
    }

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
