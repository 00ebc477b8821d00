//! Unit tests for glow name and size conversion
//!
//! Tests pure conversion functions without requiring a GL context.

use super::*;
use glbind::glbind::driver::gl_constants::*;

// ============================================================================
// NAME CONVERSION TESTS
// ============================================================================

#[test]
fn test_zero_name_is_no_object() {
    assert!(framebuffer_name(0).is_none());
    assert!(renderbuffer_name(0).is_none());
    assert!(texture_name(0).is_none());
}

#[test]
fn test_nonzero_name_round_trips() {
    assert_eq!(framebuffer_name(7).map(|fb| fb.0.get()), Some(7));
    assert_eq!(renderbuffer_name(3).map(|rb| rb.0.get()), Some(3));
    assert_eq!(texture_name(u32::MAX).map(|tex| tex.0.get()), Some(u32::MAX));
}

// ============================================================================
// SIZE CONVERSION TESTS
// ============================================================================

#[test]
fn test_gl_size_clamps() {
    assert_eq!(gl_size(0), 0);
    assert_eq!(gl_size(4096), 4096);
    assert_eq!(gl_size(u32::MAX), i32::MAX);
}

// ============================================================================
// ENUM AGREEMENT TESTS
// ============================================================================

#[test]
fn test_constants_match_glow() {
    assert_eq!(GL_FRAMEBUFFER, glow::FRAMEBUFFER);
    assert_eq!(GL_READ_FRAMEBUFFER, glow::READ_FRAMEBUFFER);
    assert_eq!(GL_DRAW_FRAMEBUFFER, glow::DRAW_FRAMEBUFFER);
    assert_eq!(GL_COLOR_ATTACHMENT0, glow::COLOR_ATTACHMENT0);
    assert_eq!(GL_DEPTH24_STENCIL8, glow::DEPTH24_STENCIL8);
    assert_eq!(GL_FRAMEBUFFER_COMPLETE, glow::FRAMEBUFFER_COMPLETE);
    assert_eq!(GL_FRAMEBUFFER_UNDEFINED, glow::FRAMEBUFFER_UNDEFINED);
    assert_eq!(GL_MAX_SAMPLES, glow::MAX_SAMPLES);
    assert_eq!(GL_COLOR_BUFFER_BIT, glow::COLOR_BUFFER_BIT);
    assert_eq!(GL_CONTEXT_PROFILE_MASK, glow::CONTEXT_PROFILE_MASK);
}

#[test]
fn test_blit_mask_bits_match_glow() {
    let mask = BufferMask::COLOR | BufferMask::DEPTH;
    assert_eq!(mask.bits(), glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    assert_eq!(FramebufferTarget::Read.to_gl(), glow::READ_FRAMEBUFFER);
}
