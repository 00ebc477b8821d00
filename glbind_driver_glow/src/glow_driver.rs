/// `GlDriver` implementation on top of a glow context
///
/// The context must be current on the calling thread for every call. GL names
/// cross the boundary as raw `u32` values, 0 standing for "no object".

use std::num::NonZeroU32;
use std::sync::Arc;
use glow::HasContext;
use glbind::glbind::driver::{BlitRect, BufferMask, FramebufferTarget, GlDriver};
use glbind::glbind::{Error, Result};
use glbind::{glbind_debug, glbind_error};

const SOURCE: &str = "glbind::glow";

/// GL driver backed by a shared `glow::Context`
pub struct GlowDriver {
    gl: Arc<glow::Context>,
}

impl GlowDriver {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        glbind_debug!(SOURCE, "glow driver created (ES context: {})", gl.version().is_embedded);
        Self { gl }
    }

    /// Underlying glow context
    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }
}

// ============================================================================
// Name conversion
// ============================================================================

pub(crate) fn framebuffer_name(name: u32) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(name).map(glow::NativeFramebuffer)
}

pub(crate) fn renderbuffer_name(name: u32) -> Option<glow::NativeRenderbuffer> {
    NonZeroU32::new(name).map(glow::NativeRenderbuffer)
}

pub(crate) fn texture_name(name: u32) -> Option<glow::NativeTexture> {
    NonZeroU32::new(name).map(glow::NativeTexture)
}

/// Clamp a size or sample count to the GLsizei range
pub(crate) fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn creation_error(object: &str, message: String) -> Error {
    glbind_error!(SOURCE, "failed to create {}: {}", object, message);
    Error::BackendError(format!("failed to create {}: {}", object, message))
}

// ============================================================================
// GlDriver
// ============================================================================

impl GlDriver for GlowDriver {
    fn get_error(&mut self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn get_integer(&mut self, pname: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(pname) }
    }

    fn get_string(&mut self, name: u32) -> Option<String> {
        let value = unsafe { self.gl.get_parameter_string(name) };
        (!value.is_empty()).then_some(value)
    }

    fn extensions(&mut self) -> Vec<String> {
        self.gl.supported_extensions().iter().cloned().collect()
    }

    fn create_framebuffer(&mut self) -> Result<u32> {
        unsafe { self.gl.create_framebuffer() }
            .map(|fb| fb.0.get())
            .map_err(|e| creation_error("framebuffer", e))
    }

    fn delete_framebuffer(&mut self, framebuffer: u32) {
        if let Some(fb) = framebuffer_name(framebuffer) {
            unsafe { self.gl.delete_framebuffer(fb) }
        }
    }

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: u32) {
        unsafe { self.gl.bind_framebuffer(target.to_gl(), framebuffer_name(framebuffer)) }
    }

    fn check_framebuffer_status(&mut self, target: FramebufferTarget) -> u32 {
        unsafe { self.gl.check_framebuffer_status(target.to_gl()) }
    }

    fn framebuffer_renderbuffer(&mut self, target: FramebufferTarget, attachment: u32, renderbuffer: u32) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                target.to_gl(),
                attachment,
                glow::RENDERBUFFER,
                renderbuffer_name(renderbuffer),
            )
        }
    }

    fn framebuffer_texture_2d(
        &mut self,
        target: FramebufferTarget,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    ) {
        unsafe {
            self.gl.framebuffer_texture_2d(target.to_gl(), attachment, texture_target, texture_name(texture), level)
        }
    }

    fn blit_framebuffer(&mut self, src: BlitRect, dst: BlitRect, mask: BufferMask, filter: u32) {
        unsafe {
            self.gl.blit_framebuffer(
                src.x0, src.y0, src.x1, src.y1,
                dst.x0, dst.y0, dst.x1, dst.y1,
                mask.bits(),
                filter,
            )
        }
    }

    fn create_renderbuffer(&mut self) -> Result<u32> {
        unsafe { self.gl.create_renderbuffer() }
            .map(|rb| rb.0.get())
            .map_err(|e| creation_error("renderbuffer", e))
    }

    fn delete_renderbuffer(&mut self, renderbuffer: u32) {
        if let Some(rb) = renderbuffer_name(renderbuffer) {
            unsafe { self.gl.delete_renderbuffer(rb) }
        }
    }

    fn bind_renderbuffer(&mut self, renderbuffer: u32) {
        unsafe { self.gl.bind_renderbuffer(glow::RENDERBUFFER, renderbuffer_name(renderbuffer)) }
    }

    fn renderbuffer_storage(&mut self, internal_format: u32, width: u32, height: u32) {
        unsafe {
            self.gl.renderbuffer_storage(glow::RENDERBUFFER, internal_format, gl_size(width), gl_size(height))
        }
    }

    fn renderbuffer_storage_multisample(&mut self, samples: u32, internal_format: u32, width: u32, height: u32) {
        unsafe {
            self.gl.renderbuffer_storage_multisample(
                glow::RENDERBUFFER,
                gl_size(samples),
                internal_format,
                gl_size(width),
                gl_size(height),
            )
        }
    }

    fn create_texture(&mut self) -> Result<u32> {
        unsafe { self.gl.create_texture() }
            .map(|tex| tex.0.get())
            .map_err(|e| creation_error("texture", e))
    }

    fn delete_texture(&mut self, texture: u32) {
        if let Some(tex) = texture_name(texture) {
            unsafe { self.gl.delete_texture(tex) }
        }
    }

    fn bind_texture(&mut self, target: u32, texture: u32) {
        unsafe { self.gl.bind_texture(target, texture_name(texture)) }
    }

    fn tex_parameter(&mut self, target: u32, pname: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(target, pname, value) }
    }

    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: u32,
        width: u32,
        height: u32,
        data_format: u32,
        data_type: u32,
    ) {
        unsafe {
            self.gl.tex_image_2d(
                target,
                level,
                internal_format as i32,
                gl_size(width),
                gl_size(height),
                0,
                data_format,
                data_type,
                glow::PixelUnpackData::Slice(None),
            )
        }
    }
}

#[cfg(test)]
#[path = "glow_driver_tests.rs"]
mod tests;
