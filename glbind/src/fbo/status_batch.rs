/// Deferred completeness checking
///
/// Building an FBO step by step passes through incomplete states. A
/// `StatusBatch` runs attach and recreate operations without checking
/// completeness after each one; `finish` checks once at the end.
///
/// ```ignore
/// let mut batch = fbo.batch();
/// batch.attach_colorbuffer(gl, 0, true)?;
/// batch.attach_renderbuffer(gl, AttachmentKind::Depth, 24)?;
/// batch.finish(gl)?;
/// ```
///
/// Dropping a batch without calling `finish` skips the check.

use crate::driver::GlDriver;
use crate::error::Result;
use crate::glbind_warn;
use super::attachment::{Attachment, AttachmentKey, AttachmentKind};
use super::fbo::{Fbo, StatusCheck, SOURCE};

pub struct StatusBatch<'a> {
    fbo: &'a mut Fbo,
}

impl Fbo {
    /// Start a batch of operations validated once by `StatusBatch::finish`
    pub fn batch(&mut self) -> StatusBatch<'_> {
        StatusBatch { fbo: self }
    }
}

impl<'a> StatusBatch<'a> {
    pub fn fbo(&self) -> &Fbo {
        &*self.fbo
    }

    pub fn attach_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32, alpha: bool) -> Result<AttachmentKey> {
        self.fbo.attach_colorbuffer_impl(gl, point, alpha, false, StatusCheck::Deferred)
    }

    pub fn attach_texture2d(&mut self, gl: &mut dyn GlDriver, point: u32, alpha: bool) -> Result<AttachmentKey> {
        self.fbo.attach_colorbuffer_impl(gl, point, alpha, true, StatusCheck::Deferred)
    }

    pub fn attach_colorbuffer_with(
        &mut self,
        gl: &mut dyn GlDriver,
        point: u32,
        attachment: impl Into<Attachment>,
    ) -> Result<AttachmentKey> {
        self.fbo.attach_color_impl(gl, point, attachment.into(), StatusCheck::Deferred)
    }

    pub fn attach_renderbuffer(&mut self, gl: &mut dyn GlDriver, kind: AttachmentKind, bits: u32) -> Result<()> {
        self.fbo.attach_renderbuffer_impl(gl, kind, bits, StatusCheck::Deferred)
    }

    pub fn attach_renderbuffer_format(&mut self, gl: &mut dyn GlDriver, format: u32) -> Result<()> {
        self.fbo.attach_renderbuffer_format_impl(gl, format, StatusCheck::Deferred)
    }

    /// Detach and free the color attachment at `point`; `Ok(false)` when empty
    pub fn dispose_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32) -> Result<bool> {
        self.fbo.require_initialized("dispose color")?;
        self.fbo.check_color_point(point)?;
        Ok(self.fbo.dispose_color_slot(gl, point))
    }

    pub fn recreate_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32) -> Result<Option<AttachmentKey>> {
        self.fbo.recreate_colorbuffer_impl(gl, point, StatusCheck::Deferred)
    }

    /// Recreate every attachment for the current size and samples
    ///
    /// Any failure disposes all attachments of the FBO.
    pub(super) fn recreate_all(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        let result = self.recreate_all_inner(gl);
        if result.is_err() {
            glbind_warn!(SOURCE, "FBO #{} recreate failed, disposing all attachments", self.fbo.handle);
            self.fbo.dispose_all(gl);
        }
        result
    }

    fn recreate_all_inner(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        for point in 0..self.fbo.max_color_attachments {
            self.fbo.recreate_colorbuffer_impl(gl, point, StatusCheck::Deferred)?;
        }
        self.fbo.recreate_depth_stencil(gl)
    }

    /// Check completeness once
    ///
    /// An invalid status disposes every attachment (resolve sink included)
    /// and fails with a `Status` error.
    pub fn finish(self, gl: &mut dyn GlDriver) -> Result<()> {
        if !self.fbo.initialized {
            return Ok(());
        }
        if let Err(err) = self.fbo.validate(gl, "batch finish") {
            glbind_warn!(SOURCE, "FBO #{} invalid after batch, disposing all attachments", self.fbo.handle);
            self.fbo.dispose_all(gl);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "status_batch_tests.rs"]
mod tests;
