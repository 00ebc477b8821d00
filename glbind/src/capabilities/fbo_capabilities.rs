/// Capability snapshot consumed by `Fbo::init`
///
/// Built by `DeviceCapabilities::fbo_capabilities()` or by hand. The FBO keeps
/// its own copy, so later registry changes never affect a live FBO.

use bitflags::bitflags;

/// Upper bound on color attachment points, whatever the device reports
pub const MAX_COLOR_ATTACHMENTS_CEILING: u32 = 8;

/// Tolerance over GL_MAX_TEXTURE_SIZE accepted for FBO dimensions
pub const SIZE_SLACK: u32 = 2;

bitflags! {
    /// Renderable formats available on the device
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormatSupport: u32 {
        const RGBA8 = 1 << 0;
        const DEPTH24 = 1 << 1;
        const DEPTH32 = 1 << 2;
        const STENCIL1 = 1 << 3;
        const STENCIL4 = 1 << 4;
        const STENCIL8 = 1 << 5;
        const STENCIL16 = 1 << 6;
        const PACKED_DEPTH_STENCIL = 1 << 7;
    }
}

/// FBO-related device capabilities
///
/// `Default` describes a device without any FBO support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FboCapabilities {
    /// Framebuffer objects exist at all (GL 3.0, ES 2.0 or an FBO extension)
    pub basic_fbo_support: bool,
    /// Separate read/draw bindings, multisampled renderbuffers and blit
    pub full_fbo_support: bool,
    pub formats: FormatSupport,
    pub max_color_attachments: u32,
    pub max_samples: u32,
    pub max_texture_size: u32,
    pub max_renderbuffer_size: u32,
}

impl FboCapabilities {
    pub fn rgba8_available(&self) -> bool {
        self.formats.contains(FormatSupport::RGBA8)
    }

    pub fn depth24_available(&self) -> bool {
        self.formats.contains(FormatSupport::DEPTH24)
    }

    pub fn depth32_available(&self) -> bool {
        self.formats.contains(FormatSupport::DEPTH32)
    }

    /// Availability of a stencil index format with exactly `bits` bits
    pub fn stencil_available(&self, bits: u32) -> bool {
        let flag = match bits {
            1 => FormatSupport::STENCIL1,
            4 => FormatSupport::STENCIL4,
            8 => FormatSupport::STENCIL8,
            16 => FormatSupport::STENCIL16,
            _ => return false,
        };
        self.formats.contains(flag)
    }

    pub fn packed_depth_stencil_available(&self) -> bool {
        self.formats.contains(FormatSupport::PACKED_DEPTH_STENCIL)
    }

    /// Device limit capped to `MAX_COLOR_ATTACHMENTS_CEILING` (at least 1)
    pub fn capped_color_attachments(&self) -> u32 {
        self.max_color_attachments.clamp(1, MAX_COLOR_ATTACHMENTS_CEILING)
    }

    /// Whether `width` x `height` fits the texture and renderbuffer limits
    pub fn fits(&self, width: u32, height: u32) -> bool {
        let max_texture = self.max_texture_size.saturating_add(SIZE_SLACK);
        width <= max_texture
            && height <= max_texture
            && width <= self.max_renderbuffer_size
            && height <= self.max_renderbuffer_size
    }
}

#[cfg(test)]
#[path = "fbo_capabilities_tests.rs"]
mod tests;
