//! Unit tests for error.rs
//!
//! Tests Error variants, their Display output and the logging error macros.

use crate::error::{Error, Result};
use crate::fbo::FboStatus;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_argument_display() {
    let err = Error::InvalidArgument("color attachment point 9 out of range".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid argument"));
    assert!(display.contains("point 9"));
}

#[test]
fn test_allocation_display_carries_hex_code() {
    let err = Error::Allocation {
        code: 0x505,
        description: "renderbuffer COLOR 64x64".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("0x505"));
    assert!(display.contains("renderbuffer COLOR 64x64"));
}

#[test]
fn test_driver_display() {
    let err = Error::Driver { code: 0x502, operation: "resolve blit".to_string() };
    assert_eq!(format!("{}", err), "GL error 0x502 during resolve blit");
}

#[test]
fn test_size_exceeded_display() {
    let err = Error::SizeExceeded {
        width: 9000,
        height: 16,
        max_texture_size: 8192,
        max_renderbuffer_size: 8192,
    };
    let display = format!("{}", err);
    assert!(display.contains("9000x16"));
    assert!(display.contains("8192"));
}

#[test]
fn test_status_display_uses_status_description() {
    let err = Error::Status {
        status: FboStatus::Unsupported,
        message: "attach depth".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains(FboStatus::Unsupported.description()));
    assert!(display.contains("attach depth"));
}

#[test]
fn test_internal_display() {
    let err = Error::Internal("sink mismatch".to_string());
    assert_eq!(format!("{}", err), "Internal error: sink mismatch");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::Unsupported("depth texture".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::AlreadyAttached("depth".to_string()));
    assert!(debug.contains("AlreadyAttached"));

    let debug = format!("{:?}", Error::Allocation { code: 1, description: "x".to_string() });
    assert!(debug.contains("Allocation"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::InvalidState("not initialized".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
fn test_glbind_err_builds_variant() {
    let err = crate::glbind_err!("glbind::test", Unsupported, "texture {} with MSAA", 3);
    match err {
        Error::Unsupported(msg) => assert_eq!(msg, "texture 3 with MSAA"),
        other => panic!("unexpected variant {:?}", other),
    }
}

#[test]
fn test_glbind_bail_returns_early() {
    fn check(value: u32) -> Result<u32> {
        if value > 8 {
            crate::glbind_bail!("glbind::test", InvalidArgument, "value {} too large", value);
        }
        Ok(value)
    }

    assert_eq!(check(2).unwrap(), 2);
    assert!(matches!(check(9), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::Internal("boom".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
