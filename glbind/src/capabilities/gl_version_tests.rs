/// Tests for GlVersion parsing

use super::*;

// ============================================================================
// Tests: Desktop strings
// ============================================================================

#[test]
fn test_parse_desktop_with_vendor_suffix() {
    let v = GlVersion::parse("4.6.0 NVIDIA 535.54.03").unwrap();
    assert_eq!(v, GlVersion::new(GlApi::Desktop, 4, 6));
}

#[test]
fn test_parse_mesa_core_profile() {
    let v = GlVersion::parse("4.5 (Core Profile) Mesa 23.1.4").unwrap();
    assert_eq!((v.major, v.minor), (4, 5));
    assert!(v.is_desktop());
}

#[test]
fn test_parse_with_opengl_prefix() {
    let v = GlVersion::parse("OpenGL 3.3").unwrap();
    assert_eq!(v, GlVersion::new(GlApi::Desktop, 3, 3));
}

#[test]
fn test_parse_minor_with_trailing_letters() {
    let v = GlVersion::parse("2.1-build 8.0").unwrap();
    assert_eq!((v.major, v.minor), (2, 1));
}

// ============================================================================
// Tests: ES strings
// ============================================================================

#[test]
fn test_parse_es3() {
    let v = GlVersion::parse("OpenGL ES 3.2 Mesa 23.1").unwrap();
    assert_eq!(v, GlVersion::new(GlApi::Es, 3, 2));
    assert!(v.is_es());
}

#[test]
fn test_parse_es1_common_profile() {
    let v = GlVersion::parse("OpenGL ES-CM 1.1").unwrap();
    assert_eq!(v, GlVersion::new(GlApi::Es, 1, 1));
}

// ============================================================================
// Tests: Errors and helpers
// ============================================================================

#[test]
fn test_parse_rejects_garbage() {
    assert!(GlVersion::parse("").is_err());
    assert!(GlVersion::parse("Mock Driver").is_err());
    assert!(GlVersion::parse("4 NVIDIA").is_err());
}

#[test]
fn test_at_least() {
    let v = GlVersion::new(GlApi::Desktop, 3, 1);
    assert!(v.at_least(3, 0));
    assert!(v.at_least(3, 1));
    assert!(!v.at_least(3, 2));
    assert!(!v.at_least(4, 0));
}

#[test]
fn test_display() {
    assert_eq!(GlVersion::new(GlApi::Desktop, 4, 6).to_string(), "4.6");
    assert_eq!(GlVersion::new(GlApi::Es, 2, 0).to_string(), "ES 2.0");
}
