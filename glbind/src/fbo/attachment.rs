/// Framebuffer attachment types
///
/// An attachment has an immutable kind and internal format, a mutable size and a
/// native GL handle (0 = not allocated). The handle goes from 0 to non-zero only
/// through `initialize` and back to 0 only through `free`.

use std::fmt;
use slotmap::new_key_type;
use crate::driver::gl_constants::*;
use crate::driver::{FramebufferTarget, GlDriver};
use crate::error::Result;
use super::formats;
use super::render_attachment::RenderAttachment;
use super::texture_attachment::TextureAttachment;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for an attachment owned by an `Fbo`.
    ///
    /// Recreating an attachment in place (resize, sample change) keeps its key.
    /// A key becomes invalid once its attachment is detached.
    pub struct AttachmentKey;
}

// ===== KIND =====

/// What an attachment provides to the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    None,
    Depth,
    Stencil,
    /// Packed depth + stencil in one renderbuffer
    DepthStencil,
    Color,
    ColorTexture,
    DepthTexture,
    StencilTexture,
}

impl AttachmentKind {
    pub fn name(self) -> &'static str {
        match self {
            AttachmentKind::None => "NONE",
            AttachmentKind::Depth => "DEPTH",
            AttachmentKind::Stencil => "STENCIL",
            AttachmentKind::DepthStencil => "DEPTH_STENCIL",
            AttachmentKind::Color => "COLOR",
            AttachmentKind::ColorTexture => "COLOR_TEXTURE",
            AttachmentKind::DepthTexture => "DEPTH_TEXTURE",
            AttachmentKind::StencilTexture => "STENCIL_TEXTURE",
        }
    }

    /// Color renderbuffer or color texture
    pub fn is_color(self) -> bool {
        matches!(self, AttachmentKind::Color | AttachmentKind::ColorTexture)
    }

    pub fn is_texture(self) -> bool {
        matches!(
            self,
            AttachmentKind::ColorTexture | AttachmentKind::DepthTexture | AttachmentKind::StencilTexture
        )
    }

    pub fn has_depth(self) -> bool {
        matches!(self, AttachmentKind::Depth | AttachmentKind::DepthStencil | AttachmentKind::DepthTexture)
    }

    pub fn has_stencil(self) -> bool {
        matches!(self, AttachmentKind::Stencil | AttachmentKind::DepthStencil | AttachmentKind::StencilTexture)
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===== SURFACE BITS =====

/// Bit depths of a framebuffer configuration
///
/// Describes what an attachment (or a whole FBO) contributes, in the same
/// terms a pixel-format request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceBits {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
    pub depth: u32,
    pub stencil: u32,
    pub samples: u32,
}

impl SurfaceBits {
    pub fn has_alpha(&self) -> bool {
        self.alpha > 0
    }
}

// ===== ATTACHMENT =====

/// Attachment owned by an `Fbo`: renderbuffer-backed or texture-backed
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Attachment {
    Render(RenderAttachment),
    Texture(TextureAttachment),
}

impl Attachment {
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Render(rb) => rb.kind(),
            Attachment::Texture(tex) => tex.kind(),
        }
    }

    /// Internal format
    pub fn format(&self) -> u32 {
        match self {
            Attachment::Render(rb) => rb.format(),
            Attachment::Texture(tex) => tex.format(),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Attachment::Render(rb) => rb.width(),
            Attachment::Texture(tex) => tex.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Attachment::Render(rb) => rb.height(),
            Attachment::Texture(tex) => tex.height(),
        }
    }

    /// GL name (0 = not allocated)
    pub fn handle(&self) -> u32 {
        match self {
            Attachment::Render(rb) => rb.handle(),
            Attachment::Texture(tex) => tex.handle(),
        }
    }

    /// Sample count (always 0 for textures)
    pub fn samples(&self) -> u32 {
        match self {
            Attachment::Render(rb) => rb.samples(),
            Attachment::Texture(_) => 0,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.handle() != 0
    }

    pub fn as_render(&self) -> Option<&RenderAttachment> {
        match self {
            Attachment::Render(rb) => Some(rb),
            Attachment::Texture(_) => None,
        }
    }

    pub fn as_texture(&self) -> Option<&TextureAttachment> {
        match self {
            Attachment::Texture(tex) => Some(tex),
            Attachment::Render(_) => None,
        }
    }

    /// Allocate GPU storage; `Ok(false)` when already allocated
    pub fn initialize(&mut self, gl: &mut dyn GlDriver) -> Result<bool> {
        match self {
            Attachment::Render(rb) => rb.initialize(gl),
            Attachment::Texture(tex) => tex.initialize(gl),
        }
    }

    /// Release GPU storage (no-op when not allocated)
    pub fn free(&mut self, gl: &mut dyn GlDriver) {
        match self {
            Attachment::Render(rb) => rb.free(gl),
            Attachment::Texture(tex) => tex.free(gl),
        }
    }

    /// Bit depths this attachment provides
    pub fn describe(&self) -> SurfaceBits {
        SurfaceBits {
            samples: self.samples(),
            ..formats::surface_bits_of(self.format())
        }
    }

    /// Bind to `attachment_point` of the framebuffer bound to `target`
    pub(crate) fn attach_to(&self, gl: &mut dyn GlDriver, target: FramebufferTarget, attachment_point: u32) {
        match self {
            Attachment::Render(rb) => gl.framebuffer_renderbuffer(target, attachment_point, rb.handle()),
            Attachment::Texture(tex) => {
                gl.framebuffer_texture_2d(target, attachment_point, GL_TEXTURE_2D, tex.handle(), 0)
            }
        }
    }

    /// Clear `attachment_point`, using the call matching this attachment's backing
    pub(crate) fn detach_from(&self, gl: &mut dyn GlDriver, target: FramebufferTarget, attachment_point: u32) {
        match self {
            Attachment::Render(_) => gl.framebuffer_renderbuffer(target, attachment_point, 0),
            Attachment::Texture(_) => gl.framebuffer_texture_2d(target, attachment_point, GL_TEXTURE_2D, 0, 0),
        }
    }
}

impl From<RenderAttachment> for Attachment {
    fn from(rb: RenderAttachment) -> Self {
        Attachment::Render(rb)
    }
}

impl From<TextureAttachment> for Attachment {
    fn from(tex: TextureAttachment) -> Self {
        Attachment::Texture(tex)
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Render(rb) => rb.fmt(f),
            Attachment::Texture(tex) => tex.fmt(f),
        }
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
