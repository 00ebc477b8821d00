/// GL driver boundary trait
///
/// Every GPU-side effect of the FBO manager and the capability registry goes
/// through this trait. Backends (glow, test mocks) implement it on top of a
/// context that is current on the calling thread.

use bitflags::bitflags;
use crate::driver::gl_constants::*;
use crate::error::Result;

/// Framebuffer binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferTarget {
    /// Both read and draw bindings
    Framebuffer,
    /// Read binding only (blit source)
    Read,
    /// Draw binding only (blit destination, rendering)
    Draw,
}

impl FramebufferTarget {
    /// GL enum value of the target
    pub fn to_gl(self) -> u32 {
        match self {
            FramebufferTarget::Framebuffer => GL_FRAMEBUFFER,
            FramebufferTarget::Read => GL_READ_FRAMEBUFFER,
            FramebufferTarget::Draw => GL_DRAW_FRAMEBUFFER,
        }
    }

    /// GL enum used to query the current binding of the target
    pub fn binding_query(self) -> u32 {
        match self {
            FramebufferTarget::Framebuffer | FramebufferTarget::Draw => GL_DRAW_FRAMEBUFFER_BINDING,
            FramebufferTarget::Read => GL_READ_FRAMEBUFFER_BINDING,
        }
    }
}

bitflags! {
    /// Buffers copied by a framebuffer blit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferMask: u32 {
        const COLOR = GL_COLOR_BUFFER_BIT;
        const DEPTH = GL_DEPTH_BUFFER_BIT;
        const STENCIL = GL_STENCIL_BUFFER_BIT;
    }
}

/// Rectangle in framebuffer pixels, `(x0, y0)` inclusive to `(x1, y1)` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BlitRect {
    /// Full-size rectangle anchored at the origin
    pub fn sized(width: u32, height: u32) -> Self {
        Self { x0: 0, y0: 0, x1: width as i32, y1: height as i32 }
    }
}

/// OpenGL driver boundary
///
/// Object names are raw GL names, 0 meaning "no object". Creation methods
/// return an error only when the binding itself cannot produce a name; GL-level
/// failures are reported through `get_error` like in plain GL.
pub trait GlDriver {
    // ===== STATE QUERIES =====

    /// Pop the oldest pending GL error (GL_NO_ERROR when none)
    fn get_error(&mut self) -> u32;

    /// glGetIntegerv for a single value
    fn get_integer(&mut self, pname: u32) -> i32;

    /// glGetString (None when the driver returns NULL)
    fn get_string(&mut self, name: u32) -> Option<String>;

    /// Supported extension names
    fn extensions(&mut self) -> Vec<String>;

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&mut self) -> Result<u32>;

    fn delete_framebuffer(&mut self, framebuffer: u32);

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: u32);

    /// Name currently bound to `target` (0 = default framebuffer)
    fn framebuffer_binding(&mut self, target: FramebufferTarget) -> u32 {
        self.get_integer(target.binding_query()).max(0) as u32
    }

    fn check_framebuffer_status(&mut self, target: FramebufferTarget) -> u32;

    fn framebuffer_renderbuffer(&mut self, target: FramebufferTarget, attachment: u32, renderbuffer: u32);

    fn framebuffer_texture_2d(
        &mut self,
        target: FramebufferTarget,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    );

    fn blit_framebuffer(&mut self, src: BlitRect, dst: BlitRect, mask: BufferMask, filter: u32);

    // ===== RENDERBUFFERS =====

    fn create_renderbuffer(&mut self) -> Result<u32>;

    fn delete_renderbuffer(&mut self, renderbuffer: u32);

    fn bind_renderbuffer(&mut self, renderbuffer: u32);

    fn renderbuffer_storage(&mut self, internal_format: u32, width: u32, height: u32);

    fn renderbuffer_storage_multisample(&mut self, samples: u32, internal_format: u32, width: u32, height: u32);

    // ===== TEXTURES =====

    fn create_texture(&mut self) -> Result<u32>;

    fn delete_texture(&mut self, texture: u32);

    fn bind_texture(&mut self, target: u32, texture: u32);

    fn tex_parameter(&mut self, target: u32, pname: u32, value: i32);

    /// Allocate level storage without uploading pixels
    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: u32,
        width: u32,
        height: u32,
        data_format: u32,
        data_type: u32,
    );
}

/// Fail when the driver already has an error queued before `operation`
///
/// Drains the pending error so the next check starts clean.
pub fn check_pre_gl_error(gl: &mut dyn GlDriver, operation: &str) -> Result<()> {
    let code = gl.get_error();
    if code != GL_NO_ERROR {
        crate::glbind_error!("glbind::GlDriver", "pre-existing GL error 0x{:X} before {}", code, operation);
        return Err(crate::error::Error::Driver {
            code,
            operation: format!("pre-existing error before {}", operation),
        });
    }
    Ok(())
}
