/// Per-device capability probe
///
/// Everything here is read once from a current context: identification strings,
/// extensions and integer limits. Derived data (available profiles, rasterizer
/// kind, quirks, the FBO snapshot) is computed from those values only, so a
/// `DeviceCapabilities` can also be built by hand for tests or offline tools.

use bitflags::bitflags;
use rustc_hash::FxHashSet;
use crate::driver::gl_constants::*;
use crate::driver::{check_pre_gl_error, GlDriver};
use crate::error::Result;
use crate::{glbind_debug, glbind_err, glbind_trace};
use super::fbo_capabilities::{FboCapabilities, FormatSupport};
use super::gl_version::GlVersion;
use super::profile::GlProfile;

/// Renderer substrings identifying software implementations (lowercase)
const SOFTWARE_RENDERERS: &[&str] = &[
    "llvmpipe",
    "softpipe",
    "swrast",
    "swiftshader",
    "software rasterizer",
    "gdi generic",
    "apple software renderer",
];

/// Upper bound on errors drained after probing unsupported limits
const MAX_DRAINED_ERRORS: usize = 16;

/// Kind of rasterizer behind a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rasterizer {
    Hardware,
    Software,
}

impl Rasterizer {
    /// Classify a GL_RENDERER string
    pub fn detect(renderer: &str) -> Self {
        let renderer = renderer.to_ascii_lowercase();
        if SOFTWARE_RENDERERS.iter().any(|name| renderer.contains(name)) {
            Rasterizer::Software
        } else {
            Rasterizer::Hardware
        }
    }
}

bitflags! {
    /// Known driver deficiencies
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Quirks: u32 {
        /// Rendering happens on the CPU
        const SOFTWARE_RASTERIZER = 1 << 0;
        /// Multisampled renderbuffers are unusable (MSAA disabled in the FBO snapshot)
        const NO_MULTISAMPLE_BUFFERS = 1 << 1;
        /// Color renderbuffers misbehave on some Mesa Intel drivers
        const BUGGY_COLOR_RENDERBUFFER = 1 << 2;
    }
}

impl Quirks {
    pub fn detect(vendor: &str, renderer: &str, rasterizer: Rasterizer) -> Self {
        let mut quirks = Quirks::empty();
        if rasterizer == Rasterizer::Software {
            quirks |= Quirks::SOFTWARE_RASTERIZER | Quirks::NO_MULTISAMPLE_BUFFERS;
        }
        let renderer = renderer.to_ascii_lowercase();
        if renderer.contains("mesa dri intel") || (vendor.contains("Intel") && renderer.contains("mesa")) {
            quirks |= Quirks::BUGGY_COLOR_RENDERBUFFER;
        }
        quirks
    }
}

/// Capabilities of one device (one connection string)
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    pub connection: String,
    pub version: GlVersion,
    /// Desktop context exposes the fixed-function pipeline
    pub compatibility: bool,
    pub vendor: String,
    pub renderer: String,
    pub extensions: FxHashSet<String>,
    pub rasterizer: Rasterizer,
    pub quirks: Quirks,
    pub max_color_attachments: u32,
    pub max_samples: u32,
    pub max_texture_size: u32,
    pub max_renderbuffer_size: u32,
    /// Available profiles, in `GlProfile::ALL` order
    pub profiles: Vec<GlProfile>,
}

impl DeviceCapabilities {
    /// Probe the context current on the calling thread
    ///
    /// # Errors
    ///
    /// - `Driver` if an error is already pending
    /// - `InitializationFailed` if GL_VERSION is missing or unparsable
    pub fn probe(gl: &mut dyn GlDriver, connection: &str) -> Result<Self> {
        check_pre_gl_error(gl, "capability probe")?;

        let version_string = gl.get_string(GL_VERSION).ok_or_else(|| {
            glbind_err!("glbind::CapabilityRegistry", InitializationFailed,
                "no GL_VERSION on device '{}'", connection)
        })?;
        let version = GlVersion::parse(&version_string).map_err(|e| {
            glbind_err!("glbind::CapabilityRegistry", InitializationFailed,
                "device '{}': {}", connection, e)
        })?;
        let vendor = gl.get_string(GL_VENDOR).unwrap_or_default();
        let renderer = gl.get_string(GL_RENDERER).unwrap_or_default();
        let extensions: FxHashSet<String> = gl.extensions().into_iter().collect();

        let profile_mask = gl.get_integer(GL_CONTEXT_PROFILE_MASK);
        let compatibility = version.is_desktop()
            && (!version.at_least(3, 2)
                || profile_mask & GL_CONTEXT_COMPATIBILITY_PROFILE_BIT != 0
                || version_string.contains("Compatibility Profile"));

        let max_color_attachments = gl.get_integer(GL_MAX_COLOR_ATTACHMENTS).max(0) as u32;
        let max_samples = gl.get_integer(GL_MAX_SAMPLES).max(0) as u32;
        let max_texture_size = gl.get_integer(GL_MAX_TEXTURE_SIZE).max(0) as u32;
        let max_renderbuffer_size = gl.get_integer(GL_MAX_RENDERBUFFER_SIZE).max(0) as u32;

        // Limits unknown to older contexts raise GL_INVALID_ENUM; they read as 0
        for _ in 0..MAX_DRAINED_ERRORS {
            let code = gl.get_error();
            if code == GL_NO_ERROR {
                break;
            }
            glbind_trace!("glbind::CapabilityRegistry", "ignored GL error 0x{:X} while probing limits", code);
        }

        let rasterizer = Rasterizer::detect(&renderer);
        let quirks = Quirks::detect(&vendor, &renderer, rasterizer);

        let mut caps = Self {
            connection: connection.to_string(),
            version,
            compatibility,
            vendor,
            renderer,
            extensions,
            rasterizer,
            quirks,
            max_color_attachments,
            max_samples,
            max_texture_size,
            max_renderbuffer_size,
            profiles: Vec::new(),
        };
        caps.profiles = caps.compute_profiles();

        glbind_debug!("glbind::CapabilityRegistry",
            "probed '{}': GL {} ({:?}), renderer '{}', profiles {:?}",
            connection, caps.version, caps.rasterizer, caps.renderer, caps.profiles);

        Ok(caps)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    pub fn is_profile_available(&self, profile: GlProfile) -> bool {
        self.profiles.contains(&profile)
    }

    pub fn is_software(&self) -> bool {
        self.rasterizer == Rasterizer::Software
    }

    /// Profiles this device can provide, natively or through ES-compatibility extensions
    fn compute_profiles(&self) -> Vec<GlProfile> {
        GlProfile::ALL
            .into_iter()
            .filter(|profile| {
                profile.is_native_to(&self.version, self.compatibility)
                    || match profile {
                        GlProfile::GLES2 => {
                            self.version.is_desktop() && self.has_extension("GL_ARB_ES2_compatibility")
                        }
                        GlProfile::GLES3 => {
                            self.version.is_desktop() && self.has_extension("GL_ARB_ES3_compatibility")
                        }
                        _ => false,
                    }
            })
            .collect()
    }

    /// Derive the snapshot handed to `Fbo::init`
    pub fn fbo_capabilities(&self) -> FboCapabilities {
        let desktop = self.version.is_desktop();
        let gl3 = desktop && self.version.at_least(3, 0);
        let es2 = self.version.is_es() && self.version.at_least(2, 0);
        let es3 = self.version.is_es() && self.version.at_least(3, 0);
        let ext = |name: &str| self.has_extension(name);

        let basic = gl3
            || es2
            || ext("GL_ARB_framebuffer_object")
            || ext("GL_EXT_framebuffer_object")
            || ext("GL_OES_framebuffer_object");
        if !basic {
            return FboCapabilities::default();
        }

        let full = gl3
            || es3
            || ext("GL_ARB_framebuffer_object")
            || (ext("GL_EXT_framebuffer_object")
                && ext("GL_EXT_framebuffer_multisample")
                && ext("GL_EXT_framebuffer_blit"));

        let mut formats = FormatSupport::STENCIL8;
        formats.set(FormatSupport::RGBA8, desktop || es3 || ext("GL_OES_rgb8_rgba8") || ext("GL_ARM_rgba8"));
        formats.set(FormatSupport::DEPTH24, desktop || es3 || ext("GL_OES_depth24"));
        formats.set(FormatSupport::DEPTH32, desktop || ext("GL_OES_depth32"));
        formats.set(FormatSupport::STENCIL1, desktop || ext("GL_OES_stencil1"));
        formats.set(FormatSupport::STENCIL4, desktop || ext("GL_OES_stencil4"));
        formats.set(FormatSupport::STENCIL16, desktop);
        formats.set(
            FormatSupport::PACKED_DEPTH_STENCIL,
            gl3 || es3 || ext("GL_EXT_packed_depth_stencil") || ext("GL_OES_packed_depth_stencil"),
        );

        let max_color_attachments = if full { self.max_color_attachments.max(1) } else { 1 };
        let max_samples = if full && !self.quirks.contains(Quirks::NO_MULTISAMPLE_BUFFERS) {
            self.max_samples
        } else {
            0
        };

        FboCapabilities {
            basic_fbo_support: true,
            full_fbo_support: full,
            formats,
            max_color_attachments,
            max_samples,
            max_texture_size: self.max_texture_size,
            max_renderbuffer_size: self.max_renderbuffer_size,
        }
    }
}

#[cfg(test)]
#[path = "device_capabilities_tests.rs"]
mod tests;
