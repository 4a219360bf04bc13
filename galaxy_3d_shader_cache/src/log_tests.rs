//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger filtering/formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::ShaderCache".to_string(),
        message: "Loaded shader basic.vert".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    let severities = [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ];
    for severity in severities {
        assert_eq!(severity.label().len(), 5, "{:?}", severity);
    }
    assert_eq!(LogSeverity::Info.label().trim(), "INFO");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_clone() {
    let entry1 = entry(LogSeverity::Warn, Some("shader_cache.rs"), Some(10));
    let entry2 = entry1.clone();

    assert_eq!(entry1.severity, entry2.severity);
    assert_eq!(entry1.source, entry2.source);
    assert_eq!(entry1.message, entry2.message);
    assert_eq!(entry1.file, entry2.file);
    assert_eq!(entry1.line, entry2.line);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_min_severity_is_info() {
    let logger = DefaultLogger::default();
    assert_eq!(logger.min_severity(), LogSeverity::Info);
    assert!(!logger.accepts(LogSeverity::Debug));
    assert!(logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_custom_threshold() {
    let logger = DefaultLogger::new(LogSeverity::Trace);
    assert!(logger.accepts(LogSeverity::Trace));

    let logger = DefaultLogger::new(LogSeverity::Error);
    assert!(!logger.accepts(LogSeverity::Warn));
}

#[test]
fn test_format_entry_without_location() {
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("galaxy3d::ShaderCache"));
    assert!(line.contains("Loaded shader basic.vert"));
    assert!(!line.contains("shader_cache.rs"));
}

#[test]
fn test_format_entry_with_location() {
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Error, Some("shader_cache.rs"), Some(42)));
    assert!(line.contains("Loaded shader basic.vert"));
    assert!(line.ends_with("(shader_cache.rs:42)"));
}

#[test]
fn test_default_logger_log_does_not_panic() {
    let logger = DefaultLogger::new(LogSeverity::Trace);
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Error, Some("file.rs"), Some(1)));
}
