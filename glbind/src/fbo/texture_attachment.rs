/// Texture-backed color attachment

use std::fmt;
use std::hash::{Hash, Hasher};
use crate::driver::gl_constants::*;
use crate::driver::{check_pre_gl_error, GlDriver};
use crate::error::{Error, Result};
use crate::{glbind_bail, glbind_error, glbind_trace};
use super::attachment::AttachmentKind;

/// Pixel transfer format and sampling state of a texture attachment
///
/// `None` leaves the corresponding texture parameter at the GL default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureParams {
    pub data_format: u32,
    pub data_type: u32,
    pub mag_filter: Option<u32>,
    pub min_filter: Option<u32>,
    pub wrap_s: Option<u32>,
    pub wrap_t: Option<u32>,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            data_format: GL_RGBA,
            data_type: GL_UNSIGNED_BYTE,
            mag_filter: Some(GL_NEAREST),
            min_filter: Some(GL_NEAREST),
            wrap_s: Some(GL_CLAMP_TO_EDGE),
            wrap_t: Some(GL_CLAMP_TO_EDGE),
        }
    }
}

/// Texture attachment owning its GL name
///
/// ```compile_fail
/// use glbind::fbo::{TextureAttachment, TextureParams};
///
/// let color = TextureAttachment::color(0x8058, 8, 8, TextureParams::default());
/// let _copy = color.clone();
/// ```
#[derive(Debug)]
pub struct TextureAttachment {
    kind: AttachmentKind,
    format: u32,
    width: u32,
    height: u32,
    params: TextureParams,
    handle: u32,
}

impl TextureAttachment {
    /// Describe an unallocated texture attachment
    ///
    /// # Errors
    ///
    /// - `Unsupported` for DEPTH_TEXTURE and STENCIL_TEXTURE
    /// - `InvalidArgument` for non-texture kinds
    pub fn new(kind: AttachmentKind, internal_format: u32, width: u32, height: u32, params: TextureParams) -> Result<Self> {
        match kind {
            AttachmentKind::ColorTexture => {}
            AttachmentKind::DepthTexture | AttachmentKind::StencilTexture => {
                glbind_bail!("glbind::Attachment", Unsupported,
                    "{} attachments are not supported, use a renderbuffer", kind)
            }
            _ => glbind_bail!("glbind::Attachment", InvalidArgument,
                "{} is not a texture attachment kind", kind),
        }
        Ok(Self::color(internal_format, width, height, params))
    }

    /// Unallocated color texture
    pub fn color(internal_format: u32, width: u32, height: u32, params: TextureParams) -> Self {
        Self {
            kind: AttachmentKind::ColorTexture,
            format: internal_format,
            width,
            height,
            params,
            handle: 0,
        }
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

    pub fn params(&self) -> &TextureParams {
        &self.params
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Create the texture, set its parameters and allocate level 0
    ///
    /// Returns `Ok(false)` when already allocated. On a GL error the new
    /// texture is deleted and the handle stays 0.
    pub fn initialize(&mut self, gl: &mut dyn GlDriver) -> Result<bool> {
        if self.handle != 0 {
            return Ok(false);
        }
        check_pre_gl_error(gl, &format!("allocating {}", self))?;

        let handle = gl.create_texture()?;
        gl.bind_texture(GL_TEXTURE_2D, handle);
        let params = [
            (GL_TEXTURE_MAG_FILTER, self.params.mag_filter),
            (GL_TEXTURE_MIN_FILTER, self.params.min_filter),
            (GL_TEXTURE_WRAP_S, self.params.wrap_s),
            (GL_TEXTURE_WRAP_T, self.params.wrap_t),
        ];
        for (pname, value) in params {
            if let Some(value) = value {
                gl.tex_parameter(GL_TEXTURE_2D, pname, value as i32);
            }
        }
        self.specify_storage(gl);

        self.check_allocation(gl, handle)?;
        self.handle = handle;
        glbind_trace!("glbind::Attachment", "allocated {}", self);
        Ok(true)
    }

    /// Resize, re-specifying storage on the existing texture so the handle is kept
    ///
    /// An unallocated texture only records the new size. On a GL error the
    /// texture is deleted and the handle reset to 0.
    pub(crate) fn resize(&mut self, gl: &mut dyn GlDriver, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        if self.handle == 0 {
            return Ok(());
        }
        check_pre_gl_error(gl, &format!("resizing {}", self))?;

        let handle = self.handle;
        gl.bind_texture(GL_TEXTURE_2D, handle);
        self.specify_storage(gl);
        if let Err(err) = self.check_allocation(gl, handle) {
            self.handle = 0;
            return Err(err);
        }
        Ok(())
    }

    /// Delete the texture (no-op when not allocated)
    pub fn free(&mut self, gl: &mut dyn GlDriver) {
        if self.handle != 0 {
            glbind_trace!("glbind::Attachment", "freeing {}", self);
            gl.delete_texture(self.handle);
            self.handle = 0;
        }
    }

    fn specify_storage(&self, gl: &mut dyn GlDriver) {
        gl.tex_image_2d(
            GL_TEXTURE_2D,
            0,
            self.format,
            self.width,
            self.height,
            self.params.data_format,
            self.params.data_type,
        );
    }

    /// Delete `handle` and fail if the last storage call raised an error
    fn check_allocation(&self, gl: &mut dyn GlDriver, handle: u32) -> Result<()> {
        let code = gl.get_error();
        if code == GL_NO_ERROR {
            return Ok(());
        }
        gl.bind_texture(GL_TEXTURE_2D, 0);
        gl.delete_texture(handle);
        glbind_error!("glbind::Attachment", "GL error 0x{:X} while allocating {}", code, self);
        Err(Error::Allocation { code, description: self.to_string() })
    }

    fn identity(&self) -> (AttachmentKind, u32, u32, u32, u32) {
        (self.kind, self.format, self.width, self.height, self.handle)
    }
}

impl PartialEq for TextureAttachment {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for TextureAttachment {}

impl Hash for TextureAttachment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for TextureAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "texture {} 0x{:X} {}x{} #{}",
            self.kind, self.format, self.width, self.height, self.handle
        )
    }
}

#[cfg(test)]
#[path = "texture_attachment_tests.rs"]
mod tests;
