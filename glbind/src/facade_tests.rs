//! Unit tests for the Glbind logging façade
//!
//! LOGGER is a global OnceLock shared across all tests, so every test that
//! swaps the logger is marked #[serial].

use crate::facade::Glbind;
use crate::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

fn install_capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Glbind::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGER ROUTING TESTS
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    let entries = install_capture();

    Glbind::log(LogSeverity::Info, "glbind::test", "hello".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].source, "glbind::test");
    assert_eq!(captured[0].message, "hello");
    assert!(captured[0].file.is_none());
    drop(captured);

    Glbind::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let entries = install_capture();

    Glbind::log_detailed(LogSeverity::Error, "glbind::test", "bad".to_string(), "fbo.rs", 12);

    let captured = entries.lock().unwrap();
    assert_eq!(captured[0].file, Some("fbo.rs"));
    assert_eq!(captured[0].line, Some(12));
    drop(captured);

    Glbind::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_facade() {
    let entries = install_capture();

    crate::glbind_debug!("glbind::test", "value {}", 1);
    crate::glbind_warn!("glbind::test", "value {}", 2);
    crate::glbind_error!("glbind::test", "value {}", 3);

    let captured = entries.lock().unwrap();
    let severities: Vec<LogSeverity> = captured.iter().map(|e| e.severity).collect();
    assert_eq!(severities, vec![LogSeverity::Debug, LogSeverity::Warn, LogSeverity::Error]);
    assert!(captured[2].line.is_some());
    drop(captured);

    Glbind::reset_logger();
}

#[test]
#[serial]
fn test_error_macro_logs_before_returning() {
    let entries = install_capture();

    let _ = crate::glbind_err!("glbind::test", InvalidState, "not initialized");

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].message, "not initialized");
    drop(captured);

    Glbind::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = install_capture();
    Glbind::reset_logger();

    Glbind::log(LogSeverity::Info, "glbind::test", "to stdout".to_string());

    assert!(entries.lock().unwrap().is_empty());
}
