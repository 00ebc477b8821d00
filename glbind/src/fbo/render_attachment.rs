/// Renderbuffer-backed attachment, optionally multisampled

use std::fmt;
use std::hash::{Hash, Hasher};
use crate::driver::gl_constants::*;
use crate::driver::{check_pre_gl_error, GlDriver};
use crate::error::{Error, Result};
use crate::{glbind_bail, glbind_error, glbind_trace};
use super::attachment::AttachmentKind;

/// Renderbuffer attachment owning its GL name
///
/// Not `Clone`: a copy would share the name and free it twice.
///
/// ```compile_fail
/// use glbind::fbo::RenderAttachment;
///
/// let color = RenderAttachment::color(0x8058, 0, 8, 8);
/// let _copy = color.clone();
/// ```
#[derive(Debug)]
pub struct RenderAttachment {
    kind: AttachmentKind,
    format: u32,
    width: u32,
    height: u32,
    samples: u32,
    handle: u32,
}

impl RenderAttachment {
    /// Describe an unallocated renderbuffer
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `kind` is DEPTH, STENCIL, DEPTH_STENCIL or COLOR.
    pub fn new(kind: AttachmentKind, format: u32, samples: u32, width: u32, height: u32) -> Result<Self> {
        match kind {
            AttachmentKind::Depth | AttachmentKind::Stencil | AttachmentKind::DepthStencil | AttachmentKind::Color => {}
            _ => glbind_bail!("glbind::Attachment", InvalidArgument,
                "{} is not a renderbuffer attachment kind", kind),
        }
        Ok(Self { kind, format, width, height, samples, handle: 0 })
    }

    /// Unallocated color renderbuffer
    pub fn color(format: u32, samples: u32, width: u32, height: u32) -> Self {
        Self { kind: AttachmentKind::Color, format, width, height, samples, handle: 0 }
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn format(&self) -> u32 {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Change the size used by the next `initialize`
    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Change the sample count used by the next `initialize`
    pub(crate) fn set_samples(&mut self, samples: u32) {
        self.samples = samples;
    }

    /// Create the renderbuffer and allocate its storage
    ///
    /// Returns `Ok(false)` when already allocated. On a GL error the new
    /// renderbuffer is deleted and the handle stays 0.
    pub fn initialize(&mut self, gl: &mut dyn GlDriver) -> Result<bool> {
        if self.handle != 0 {
            return Ok(false);
        }
        check_pre_gl_error(gl, &format!("allocating {}", self))?;

        let handle = gl.create_renderbuffer()?;
        gl.bind_renderbuffer(handle);
        if self.samples > 0 {
            gl.renderbuffer_storage_multisample(self.samples, self.format, self.width, self.height);
        } else {
            gl.renderbuffer_storage(self.format, self.width, self.height);
        }

        let code = gl.get_error();
        if code != GL_NO_ERROR {
            gl.bind_renderbuffer(0);
            gl.delete_renderbuffer(handle);
            glbind_error!("glbind::Attachment", "GL error 0x{:X} while allocating {}", code, self);
            return Err(Error::Allocation { code, description: self.to_string() });
        }

        self.handle = handle;
        glbind_trace!("glbind::Attachment", "allocated {}", self);
        Ok(true)
    }

    /// Delete the renderbuffer (no-op when not allocated)
    pub fn free(&mut self, gl: &mut dyn GlDriver) {
        if self.handle != 0 {
            glbind_trace!("glbind::Attachment", "freeing {}", self);
            gl.delete_renderbuffer(self.handle);
            self.handle = 0;
        }
    }

    fn identity(&self) -> (AttachmentKind, u32, u32, u32, u32) {
        (self.kind, self.format, self.width, self.height, self.handle)
    }
}

impl PartialEq for RenderAttachment {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for RenderAttachment {}

impl Hash for RenderAttachment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for RenderAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "renderbuffer {} 0x{:X} {}x{} samples {} #{}",
            self.kind, self.format, self.width, self.height, self.samples, self.handle
        )
    }
}

#[cfg(test)]
#[path = "render_attachment_tests.rs"]
mod tests;
