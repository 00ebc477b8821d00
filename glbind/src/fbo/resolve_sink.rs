/// MSAA resolve sink management
///
/// A multisampled FBO cannot be sampled directly. Its resolve sink is a
/// single-sampled `Fbo` of the same size holding one color texture and the same
/// depth/stencil formats; `sync_resolve_sink` blits the color buffer into it.

use crate::driver::gl_constants::*;
use crate::driver::{check_pre_gl_error, BlitRect, BufferMask, FramebufferTarget, GlDriver};
use crate::error::{Error, Result};
use crate::{glbind_debug, glbind_err, glbind_error};
use super::attachment::Attachment;
use super::fbo::{Fbo, SOURCE};
use super::formats;

/// Differences between a resolve sink and its FBO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct SinkMismatch {
    pub size: bool,
    pub texture: bool,
    pub depth_stencil: bool,
}

impl SinkMismatch {
    pub fn any(&self) -> bool {
        self.size || self.texture || self.depth_stencil
    }
}

impl Fbo {
    /// Create and initialize an empty resolve sink of the given size
    pub(super) fn create_resolve_sink(&mut self, gl: &mut dyn GlDriver, width: u32, height: u32) -> Result<()> {
        let mut sink = Fbo::new(self.caps);
        sink.init(gl, width, height, 0)?;
        glbind_debug!(SOURCE, "FBO #{} created resolve sink #{}", self.handle, sink.handle);
        self.resolve_sink = Some(Box::new(sink));
        // init left the sink bound
        self.bound = false;
        Ok(())
    }

    pub(super) fn resolve_sink_mismatch(&self) -> SinkMismatch {
        let Some(sink) = self.resolve_sink.as_deref() else {
            return SinkMismatch::default();
        };
        let texture_ok = match sink.colorbuffer(0) {
            Some(Attachment::Texture(tex)) => {
                tex.handle() != 0 && tex.width() == self.width && tex.height() == self.height
            }
            _ => false,
        };
        SinkMismatch {
            size: sink.width != self.width || sink.height != self.height,
            texture: !texture_ok,
            depth_stencil: sink.depth_format() != self.depth_format()
                || sink.stencil_format() != self.stencil_format()
                || sink.is_depth_stencil_packed() != self.is_depth_stencil_packed(),
        }
    }

    /// Bring the resolve sink in line with this FBO
    ///
    /// Without multisampling the sink is destroyed. Otherwise it is created
    /// when missing, then its depth/stencil, size and color texture are fixed
    /// as needed. A sink still mismatching afterwards, or a multisampled sink,
    /// is an internal error.
    pub(super) fn reset_resolve_sink(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        if self.samples == 0 {
            if let Some(mut sink) = self.resolve_sink.take() {
                glbind_debug!(SOURCE, "FBO #{} dropping resolve sink #{}", self.handle, sink.handle);
                sink.destroy(gl);
            }
            return Ok(());
        }
        if self.resolve_sink.is_none() {
            self.create_resolve_sink(gl, self.width, self.height)?;
        }
        if let Some(sink) = self.resolve_sink.as_deref() {
            if sink.samples != 0 {
                return Err(glbind_err!(SOURCE, Internal,
                    "resolve sink #{} of FBO #{} has {} samples", sink.handle, self.handle, sink.samples));
            }
        }

        let mismatch = self.resolve_sink_mismatch();
        if !mismatch.any() {
            return Ok(());
        }
        glbind_debug!(SOURCE, "FBO #{} fixing resolve sink: {:?}", self.handle, mismatch);

        let (width, height) = (self.width, self.height);
        let depth_format = self.depth_format();
        let stencil_format = if self.is_depth_stencil_packed() { None } else { self.stencil_format() };
        let alpha = self.colorbuffer(0).map(|a| formats::has_alpha(a.format())).unwrap_or(true);

        self.unbind(gl);
        let Some(sink) = self.resolve_sink.as_deref_mut() else {
            return Err(glbind_err!(SOURCE, Internal, "resolve sink vanished while fixing it"));
        };

        if mismatch.depth_stencil {
            sink.detach_all_renderbuffers(gl);
        }
        if mismatch.size {
            sink.reset(gl, width, height, 0)?;
        }

        let mut batch = sink.batch();
        let texture_ok = matches!(batch.fbo().colorbuffer(0), Some(Attachment::Texture(tex))
            if tex.handle() != 0 && tex.width() == width && tex.height() == height);
        if !texture_ok {
            batch.dispose_colorbuffer(gl, 0)?;
            batch.attach_texture2d(gl, 0, alpha)?;
        }
        if mismatch.depth_stencil {
            if let Some(format) = depth_format {
                batch.attach_renderbuffer_format(gl, format)?;
            }
            if let Some(format) = stencil_format {
                batch.attach_renderbuffer_format(gl, format)?;
            }
        }
        batch.finish(gl)?;
        sink.unbind(gl);

        let remaining = self.resolve_sink_mismatch();
        if remaining.any() {
            return Err(glbind_err!(SOURCE, Internal,
                "resolve sink of FBO #{} still mismatching after reset: {:?}", self.handle, remaining));
        }
        Ok(())
    }

    /// Resolve the multisampled color buffer into the sink if it is dirty
    ///
    /// Marks this FBO unbound and always leaves the default framebuffers bound.
    pub fn sync_resolve_sink(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        self.require_initialized("sync_resolve_sink")?;
        self.mark_unbound();
        let result = if self.samples > 0 && self.resolve_sink_dirty {
            self.resolve_sink_dirty = false;
            self.resolve_into_sink(gl)
        } else {
            Ok(())
        };
        self.restore_default_bindings(gl);
        result
    }

    fn resolve_into_sink(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        self.reset_resolve_sink(gl)?;
        check_pre_gl_error(gl, "resolve blit")?;

        let sink_handle = self.resolve_sink.as_deref().map(|sink| sink.handle).unwrap_or(0);
        let rect = BlitRect::sized(self.width, self.height);
        gl.bind_framebuffer(FramebufferTarget::Read, self.handle);
        gl.bind_framebuffer(FramebufferTarget::Draw, sink_handle);
        gl.blit_framebuffer(rect, rect, BufferMask::COLOR, GL_NEAREST);

        let code = gl.get_error();
        if code != GL_NO_ERROR {
            glbind_error!(SOURCE, "GL error 0x{:X} resolving FBO #{} into #{}", code, self.handle, sink_handle);
            return Err(Error::Driver { code, operation: format!("resolve blit FBO #{}", self.handle) });
        }
        glbind_debug!(SOURCE, "FBO #{} resolved into sink #{}", self.handle, sink_handle);
        Ok(())
    }
}

#[cfg(test)]
#[path = "resolve_sink_tests.rs"]
mod tests;
