/// Tests for format selection

use super::*;
use crate::capabilities::FormatSupport;

fn caps(formats: FormatSupport) -> FboCapabilities {
    FboCapabilities { basic_fbo_support: true, formats, ..FboCapabilities::default() }
}

// ============================================================================
// Tests: Color formats
// ============================================================================

#[test]
fn test_color_renderbuffer_format() {
    let full = caps(FormatSupport::RGBA8);
    let none = caps(FormatSupport::empty());
    assert_eq!(color_renderbuffer_format(true, &full), GL_RGBA8);
    assert_eq!(color_renderbuffer_format(false, &full), GL_RGB8);
    assert_eq!(color_renderbuffer_format(true, &none), GL_RGBA4);
    assert_eq!(color_renderbuffer_format(false, &none), GL_RGB565);
}

#[test]
fn test_color_texture_sized_formats() {
    let tex = color_texture(false, &caps(FormatSupport::RGBA8), 16, 8);
    assert_eq!(tex.format(), GL_RGB8);
    assert_eq!(tex.params().data_format, GL_RGB);
    assert_eq!((tex.width(), tex.height()), (16, 8));
    assert_eq!(tex.handle(), 0);
}

#[test]
fn test_color_texture_unsized_formats() {
    let tex = color_texture(true, &caps(FormatSupport::empty()), 4, 4);
    assert_eq!(tex.format(), GL_RGBA);
    assert_eq!(tex.params().data_format, GL_RGBA);
    assert_eq!(tex.params().min_filter, Some(GL_NEAREST));
}

// ============================================================================
// Tests: Depth and stencil formats
// ============================================================================

#[test]
fn test_depth_format_selection() {
    let all = caps(FormatSupport::DEPTH24 | FormatSupport::DEPTH32);
    assert_eq!(depth_format(&all, 32), GL_DEPTH_COMPONENT32);
    assert_eq!(depth_format(&all, 24), GL_DEPTH_COMPONENT24);
    assert_eq!(depth_format(&all, 16), GL_DEPTH_COMPONENT16);

    let only24 = caps(FormatSupport::DEPTH24);
    assert_eq!(depth_format(&only24, 32), GL_DEPTH_COMPONENT24);
    assert_eq!(depth_format(&caps(FormatSupport::empty()), 32), GL_DEPTH_COMPONENT16);
}

#[test]
fn test_stencil_format_largest_fitting() {
    let all = caps(FormatSupport::STENCIL1 | FormatSupport::STENCIL4 | FormatSupport::STENCIL8 | FormatSupport::STENCIL16);
    assert_eq!(stencil_format(&all, 16).unwrap(), GL_STENCIL_INDEX16);
    assert_eq!(stencil_format(&all, 10).unwrap(), GL_STENCIL_INDEX8);
    assert_eq!(stencil_format(&all, 1).unwrap(), GL_STENCIL_INDEX1);

    let only8 = caps(FormatSupport::STENCIL8);
    assert_eq!(stencil_format(&only8, 16).unwrap(), GL_STENCIL_INDEX8);
}

#[test]
fn test_stencil_format_unavailable() {
    let only8 = caps(FormatSupport::STENCIL8);
    let result = stencil_format(&only8, 4);
    assert!(matches!(result, Err(crate::error::Error::Unsupported(_))));
    assert!(stencil_format(&only8, 0).is_err());
}

// ============================================================================
// Tests: Format classification
// ============================================================================

#[test]
fn test_kind_of_format() {
    assert_eq!(kind_of_format(GL_RGB565), Some(AttachmentKind::Color));
    assert_eq!(kind_of_format(GL_DEPTH_COMPONENT32), Some(AttachmentKind::Depth));
    assert_eq!(kind_of_format(GL_STENCIL_INDEX4), Some(AttachmentKind::Stencil));
    assert_eq!(kind_of_format(GL_DEPTH24_STENCIL8), Some(AttachmentKind::DepthStencil));
    assert_eq!(kind_of_format(0xDEAD), None);
}

#[test]
fn test_surface_bits() {
    let bits = surface_bits_of(GL_DEPTH24_STENCIL8);
    assert_eq!((bits.depth, bits.stencil), (24, 8));
    assert_eq!(surface_bits_of(GL_RGB565).green, 6);
    assert!(has_alpha(GL_RGB5_A1));
    assert!(!has_alpha(GL_RGB8));
}
