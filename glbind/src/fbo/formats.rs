/// Internal format selection for auto-created attachments

use crate::capabilities::FboCapabilities;
use crate::driver::gl_constants::*;
use crate::error::Result;
use crate::glbind_bail;
use super::attachment::{AttachmentKind, SurfaceBits};
use super::texture_attachment::{TextureAttachment, TextureParams};

/// Color renderbuffer format for the requested alpha channel
pub fn color_renderbuffer_format(alpha: bool, caps: &FboCapabilities) -> u32 {
    match (alpha, caps.rgba8_available()) {
        (true, true) => GL_RGBA8,
        (true, false) => GL_RGBA4,
        (false, true) => GL_RGB8,
        (false, false) => GL_RGB565,
    }
}

/// Unallocated color texture for the requested alpha channel
///
/// Sized internal formats when RGBA8 is renderable, unsized ones otherwise.
/// Filtering is NEAREST and wrapping CLAMP_TO_EDGE.
pub fn color_texture(alpha: bool, caps: &FboCapabilities, width: u32, height: u32) -> TextureAttachment {
    let (internal_format, data_format) = match (alpha, caps.rgba8_available()) {
        (true, true) => (GL_RGBA8, GL_RGBA),
        (true, false) => (GL_RGBA, GL_RGBA),
        (false, true) => (GL_RGB8, GL_RGB),
        (false, false) => (GL_RGB, GL_RGB),
    };
    let params = TextureParams { data_format, ..TextureParams::default() };
    TextureAttachment::color(internal_format, width, height, params)
}

/// Depth format with at least `bits` bits, falling back to 16
pub fn depth_format(caps: &FboCapabilities, bits: u32) -> u32 {
    if caps.depth32_available() && bits >= 32 {
        GL_DEPTH_COMPONENT32
    } else if caps.depth24_available() && bits >= 24 {
        GL_DEPTH_COMPONENT24
    } else {
        GL_DEPTH_COMPONENT16
    }
}

/// Largest available stencil format not exceeding `bits`
///
/// # Errors
///
/// `Unsupported` when no stencil format qualifies.
pub fn stencil_format(caps: &FboCapabilities, bits: u32) -> Result<u32> {
    const CANDIDATES: [(u32, u32); 4] = [
        (16, GL_STENCIL_INDEX16),
        (8, GL_STENCIL_INDEX8),
        (4, GL_STENCIL_INDEX4),
        (1, GL_STENCIL_INDEX1),
    ];
    for (candidate_bits, format) in CANDIDATES {
        if bits >= candidate_bits && caps.stencil_available(candidate_bits) {
            return Ok(format);
        }
    }
    glbind_bail!("glbind::Fbo", Unsupported, "no stencil format with at most {} bits available", bits)
}

/// Attachment kind a renderbuffer internal format provides
pub fn kind_of_format(format: u32) -> Option<AttachmentKind> {
    match format {
        GL_RGBA4 | GL_RGB5_A1 | GL_RGB565 | GL_RGB8 | GL_RGBA8 | GL_RGB | GL_RGBA => Some(AttachmentKind::Color),
        GL_DEPTH_COMPONENT16 | GL_DEPTH_COMPONENT24 | GL_DEPTH_COMPONENT32 => Some(AttachmentKind::Depth),
        GL_STENCIL_INDEX1 | GL_STENCIL_INDEX4 | GL_STENCIL_INDEX8 | GL_STENCIL_INDEX16 => Some(AttachmentKind::Stencil),
        GL_DEPTH24_STENCIL8 => Some(AttachmentKind::DepthStencil),
        _ => None,
    }
}

/// Bit depths of an internal format (samples left at 0)
pub fn surface_bits_of(format: u32) -> SurfaceBits {
    let (red, green, blue, alpha, depth, stencil) = match format {
        GL_RGBA8 | GL_RGBA => (8, 8, 8, 8, 0, 0),
        GL_RGB8 | GL_RGB => (8, 8, 8, 0, 0, 0),
        GL_RGBA4 => (4, 4, 4, 4, 0, 0),
        GL_RGB5_A1 => (5, 5, 5, 1, 0, 0),
        GL_RGB565 => (5, 6, 5, 0, 0, 0),
        GL_DEPTH_COMPONENT16 => (0, 0, 0, 0, 16, 0),
        GL_DEPTH_COMPONENT24 => (0, 0, 0, 0, 24, 0),
        GL_DEPTH_COMPONENT32 => (0, 0, 0, 0, 32, 0),
        GL_STENCIL_INDEX1 => (0, 0, 0, 0, 0, 1),
        GL_STENCIL_INDEX4 => (0, 0, 0, 0, 0, 4),
        GL_STENCIL_INDEX8 => (0, 0, 0, 0, 0, 8),
        GL_STENCIL_INDEX16 => (0, 0, 0, 0, 0, 16),
        GL_DEPTH24_STENCIL8 => (0, 0, 0, 0, 24, 8),
        _ => (0, 0, 0, 0, 0, 0),
    };
    SurfaceBits { red, green, blue, alpha, depth, stencil, samples: 0 }
}

/// Whether a color format carries alpha
pub fn has_alpha(format: u32) -> bool {
    surface_bits_of(format).has_alpha()
}

#[cfg(test)]
#[path = "formats_tests.rs"]
mod tests;
