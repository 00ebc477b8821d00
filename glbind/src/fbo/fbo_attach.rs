/// Attach, detach and recreate operations of `Fbo`
///
/// Every attach binds the FBO first, whether or not its arguments are accepted.

use crate::driver::gl_constants::*;
use crate::driver::{FramebufferTarget, GlDriver};
use crate::error::Result;
use crate::{glbind_bail, glbind_debug, glbind_err, glbind_warn};
use super::attachment::{Attachment, AttachmentKey, AttachmentKind};
use super::fbo::{DepthStencil, Fbo, StatusCheck, SOURCE};
use super::formats;
use super::render_attachment::RenderAttachment;
use super::texture_attachment::TextureAttachment;

impl Fbo {
    // ===== COLOR ATTACHMENTS =====

    /// Attach a new color renderbuffer (multisampled when the FBO is) at `point`
    ///
    /// The format is RGBA8/RGB8 when available, RGBA4/RGB565 otherwise.
    pub fn attach_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32, alpha: bool) -> Result<AttachmentKey> {
        self.attach_colorbuffer_impl(gl, point, alpha, false, StatusCheck::Immediate)
    }

    /// Attach a new color texture at `point`
    ///
    /// # Errors
    ///
    /// `Unsupported` when the FBO is multisampled.
    pub fn attach_texture2d(&mut self, gl: &mut dyn GlDriver, point: u32, alpha: bool) -> Result<AttachmentKey> {
        self.attach_colorbuffer_impl(gl, point, alpha, true, StatusCheck::Immediate)
    }

    /// Attach a caller-built color renderbuffer or texture at `point`
    ///
    /// The FBO takes ownership. It allocates the attachment if needed, and on
    /// any rejection frees it before returning the error.
    pub fn attach_colorbuffer_with(
        &mut self,
        gl: &mut dyn GlDriver,
        point: u32,
        attachment: impl Into<Attachment>,
    ) -> Result<AttachmentKey> {
        self.attach_color_impl(gl, point, attachment.into(), StatusCheck::Immediate)
    }

    pub(super) fn attach_colorbuffer_impl(
        &mut self,
        gl: &mut dyn GlDriver,
        point: u32,
        alpha: bool,
        texture: bool,
        check: StatusCheck,
    ) -> Result<AttachmentKey> {
        let attachment: Attachment = if texture {
            formats::color_texture(alpha, &self.caps, self.width, self.height).into()
        } else {
            let format = formats::color_renderbuffer_format(alpha, &self.caps);
            RenderAttachment::color(format, self.samples, self.width, self.height).into()
        };
        self.attach_color_impl(gl, point, attachment, check)
    }

    pub(super) fn attach_color_impl(
        &mut self,
        gl: &mut dyn GlDriver,
        point: u32,
        mut attachment: Attachment,
        check: StatusCheck,
    ) -> Result<AttachmentKey> {
        if let Err(err) = self.prepare_color_target(gl, point, &attachment) {
            attachment.free(gl);
            return Err(err);
        }
        attachment.initialize(gl)?;

        let key = self.attachments.insert(attachment);
        self.color_slots[point as usize] = Some(key);
        self.color_count += 1;
        self.attachments[key].attach_to(gl, FramebufferTarget::Framebuffer, GL_COLOR_ATTACHMENT0 + point);

        if check == StatusCheck::Immediate {
            let context = format!("attach color {}", point);
            if let Err(err) = self.validate(gl, &context) {
                self.dispose_color_slot(gl, point);
                return Err(err);
            }
        }

        glbind_debug!(SOURCE, "FBO #{} color {}: {}", self.handle, point, self.attachments[key]);
        Ok(key)
    }

    /// Bind the FBO, then check that `attachment` may go to color `point`
    fn prepare_color_target(&mut self, gl: &mut dyn GlDriver, point: u32, attachment: &Attachment) -> Result<()> {
        self.require_initialized("attach color")?;
        self.bind_framebuffers(gl);
        self.check_color_point(point)?;
        if self.color_slots[point as usize].is_some() {
            glbind_bail!(SOURCE, InvalidArgument, "color attachment {} of FBO #{} is occupied", point, self.handle);
        }
        if !attachment.kind().is_color() {
            glbind_bail!(SOURCE, InvalidArgument, "{} is not a color attachment", attachment.kind());
        }
        if matches!(attachment, Attachment::Texture(_)) && self.samples > 0 {
            glbind_bail!(SOURCE, Unsupported,
                "texture color attachment on FBO #{} with {} samples", self.handle, self.samples);
        }
        Ok(())
    }

    pub(super) fn check_color_point(&self, point: u32) -> Result<()> {
        if point >= self.max_color_attachments {
            glbind_bail!(SOURCE, InvalidArgument,
                "color attachment point {} out of range [0, {})", point, self.max_color_attachments);
        }
        Ok(())
    }

    // ===== DEPTH / STENCIL ATTACHMENTS =====

    /// Attach a new depth, stencil or depth-stencil renderbuffer
    ///
    /// `bits` is the minimum depth (or stencil) precision. `DepthStencil` uses
    /// the packed DEPTH24_STENCIL8 format when available, otherwise separate
    /// depth and stencil renderbuffers both selected from `bits`.
    ///
    /// # Errors
    ///
    /// - `AlreadyAttached` if the requested side is already attached
    /// - `InvalidArgument` for color or texture kinds
    /// - `Unsupported` if no stencil format qualifies
    pub fn attach_renderbuffer(&mut self, gl: &mut dyn GlDriver, kind: AttachmentKind, bits: u32) -> Result<()> {
        self.attach_renderbuffer_impl(gl, kind, bits, StatusCheck::Immediate)
    }

    /// Attach a new depth/stencil renderbuffer of an explicit internal format
    pub fn attach_renderbuffer_format(&mut self, gl: &mut dyn GlDriver, format: u32) -> Result<()> {
        self.attach_renderbuffer_format_impl(gl, format, StatusCheck::Immediate)
    }

    pub(super) fn attach_renderbuffer_impl(
        &mut self,
        gl: &mut dyn GlDriver,
        kind: AttachmentKind,
        bits: u32,
        check: StatusCheck,
    ) -> Result<()> {
        self.require_initialized("attach renderbuffer")?;
        self.bind_framebuffers(gl);
        match kind {
            AttachmentKind::Depth => {
                let format = formats::depth_format(&self.caps, bits);
                self.attach_depth_stencil_impl(gl, kind, format, check)
            }
            AttachmentKind::Stencil => {
                let format = formats::stencil_format(&self.caps, bits)?;
                self.attach_depth_stencil_impl(gl, kind, format, check)
            }
            AttachmentKind::DepthStencil => {
                if self.caps.packed_depth_stencil_available() {
                    return self.attach_depth_stencil_impl(gl, kind, GL_DEPTH24_STENCIL8, check);
                }
                self.check_depth_stencil_free(kind)?;
                let depth_format = formats::depth_format(&self.caps, bits);
                let stencil_format = formats::stencil_format(&self.caps, bits)?;

                self.attach_depth_stencil_impl(gl, AttachmentKind::Depth, depth_format, StatusCheck::Deferred)?;
                if let Err(err) = self.attach_depth_stencil_impl(gl, AttachmentKind::Stencil, stencil_format, check) {
                    glbind_warn!(SOURCE, "FBO #{} stencil attach failed, rolling back depth", self.handle);
                    self.dispose_depth_stencil(gl, AttachmentKind::Depth);
                    return Err(err);
                }
                Ok(())
            }
            _ => Err(glbind_err!(SOURCE, InvalidArgument, "{} is not a depth/stencil renderbuffer kind", kind)),
        }
    }

    pub(super) fn attach_renderbuffer_format_impl(
        &mut self,
        gl: &mut dyn GlDriver,
        format: u32,
        check: StatusCheck,
    ) -> Result<()> {
        self.require_initialized("attach renderbuffer")?;
        self.bind_framebuffers(gl);
        match formats::kind_of_format(format) {
            Some(kind @ (AttachmentKind::Depth | AttachmentKind::Stencil | AttachmentKind::DepthStencil)) => {
                self.attach_depth_stencil_impl(gl, kind, format, check)
            }
            _ => Err(glbind_err!(SOURCE, InvalidArgument,
                "format 0x{:X} is not a depth/stencil renderbuffer format", format)),
        }
    }

    fn check_depth_stencil_free(&self, kind: AttachmentKind) -> Result<()> {
        let taken = (kind.has_depth() && self.depth_stencil.depth().is_some())
            || (kind.has_stencil() && self.depth_stencil.stencil().is_some());
        if taken {
            glbind_bail!(SOURCE, AlreadyAttached, "{} already attached to FBO #{}", kind, self.handle);
        }
        Ok(())
    }

    /// Allocate one renderbuffer of `kind` and bind it to its attachment point(s)
    fn attach_depth_stencil_impl(
        &mut self,
        gl: &mut dyn GlDriver,
        kind: AttachmentKind,
        format: u32,
        check: StatusCheck,
    ) -> Result<()> {
        self.check_depth_stencil_free(kind)?;
        let mut renderbuffer = RenderAttachment::new(kind, format, self.samples, self.width, self.height)?;

        self.bind_framebuffers(gl);
        renderbuffer.initialize(gl)?;

        let key = self.attachments.insert(renderbuffer.into());
        self.depth_stencil = match kind {
            AttachmentKind::Depth => self.depth_stencil.with_depth(key),
            AttachmentKind::Stencil => self.depth_stencil.with_stencil(key),
            _ => DepthStencil::Packed(key),
        };
        for &point in attachment_points(kind) {
            self.attachments[key].attach_to(gl, FramebufferTarget::Framebuffer, point);
        }

        if check == StatusCheck::Immediate {
            let context = format!("attach {}", kind);
            if let Err(err) = self.validate(gl, &context) {
                self.dispose_depth_stencil(gl, kind);
                return Err(err);
            }
        }

        glbind_debug!(SOURCE, "FBO #{} {}: {}", self.handle, kind, self.attachments[key]);
        Ok(())
    }

    // ===== DETACH =====

    /// Detach the color attachment at `point`, returning it still allocated
    ///
    /// `Ok(None)` when the slot is empty.
    pub fn detach_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32) -> Result<Option<Attachment>> {
        self.require_initialized("detach color")?;
        self.check_color_point(point)?;
        let detached = self.take_color_slot(gl, point);
        self.update_status(gl);
        Ok(detached)
    }

    /// Detach and free the color attachment at `point`; `Ok(false)` when empty
    pub fn dispose_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32) -> Result<bool> {
        self.require_initialized("dispose color")?;
        self.check_color_point(point)?;
        let disposed = self.dispose_color_slot(gl, point);
        self.update_status(gl);
        Ok(disposed)
    }

    /// Detach depth, stencil or both, returning the renderbuffers still allocated
    ///
    /// Detaching either side of a packed depth-stencil renderbuffer detaches it
    /// from both points.
    pub fn detach_renderbuffer(&mut self, gl: &mut dyn GlDriver, kind: AttachmentKind) -> Result<Vec<Attachment>> {
        self.require_initialized("detach renderbuffer")?;
        check_depth_stencil_kind(kind)?;
        let detached = self.take_depth_stencil(gl, kind);
        self.update_status(gl);
        Ok(detached)
    }

    /// Detach and free depth, stencil or both; returns how many renderbuffers were freed
    pub fn dispose_renderbuffer(&mut self, gl: &mut dyn GlDriver, kind: AttachmentKind) -> Result<usize> {
        self.require_initialized("dispose renderbuffer")?;
        check_depth_stencil_kind(kind)?;
        let disposed = self.dispose_depth_stencil(gl, kind);
        self.update_status(gl);
        Ok(disposed)
    }

    /// Detach everything, resolve sink first, returning this FBO's attachments still allocated
    ///
    /// The resolve sink's own attachments are always freed.
    pub fn detach_all(&mut self, gl: &mut dyn GlDriver) -> Vec<Attachment> {
        if !self.initialized {
            return Vec::new();
        }
        if let Some(sink) = self.resolve_sink.as_deref_mut() {
            sink.dispose_all(gl);
        }
        let mut detached = Vec::new();
        for point in 0..self.color_slots.len() as u32 {
            detached.extend(self.take_color_slot(gl, point));
        }
        detached.extend(self.take_depth_stencil(gl, AttachmentKind::DepthStencil));
        self.update_status(gl);
        detached
    }

    /// Detach and free everything, resolve sink first
    pub fn dispose_all(&mut self, gl: &mut dyn GlDriver) {
        for mut attachment in self.detach_all(gl) {
            attachment.free(gl);
        }
    }

    /// Dispose every color attachment, resolve sink first
    pub fn detach_all_colorbuffers(&mut self, gl: &mut dyn GlDriver) {
        self.dispose_matching(gl, |_| true, false);
    }

    /// Dispose every color texture, resolve sink first
    pub fn detach_all_textures(&mut self, gl: &mut dyn GlDriver) {
        self.dispose_matching(gl, |a| matches!(a, Attachment::Texture(_)), false);
    }

    /// Dispose every renderbuffer (color, depth and stencil), resolve sink first
    pub fn detach_all_renderbuffers(&mut self, gl: &mut dyn GlDriver) {
        self.dispose_matching(gl, |a| matches!(a, Attachment::Render(_)), true);
    }

    fn dispose_matching(&mut self, gl: &mut dyn GlDriver, color_filter: fn(&Attachment) -> bool, depth_stencil: bool) {
        if !self.initialized {
            return;
        }
        if let Some(sink) = self.resolve_sink.as_deref_mut() {
            sink.dispose_matching(gl, color_filter, depth_stencil);
        }
        for point in 0..self.color_slots.len() as u32 {
            let matches = self.colorbuffer(point).map(color_filter).unwrap_or(false);
            if matches {
                self.dispose_color_slot(gl, point);
            }
        }
        if depth_stencil {
            self.dispose_depth_stencil(gl, AttachmentKind::DepthStencil);
        }
        self.update_status(gl);
    }

    /// Dispose this FBO's attachments without touching the resolve sink or status
    pub(super) fn dispose_own_attachments(&mut self, gl: &mut dyn GlDriver) {
        for point in 0..self.color_slots.len() as u32 {
            self.dispose_color_slot(gl, point);
        }
        self.dispose_depth_stencil(gl, AttachmentKind::DepthStencil);
    }

    /// Remove the color attachment at `point` from the framebuffer and the map
    pub(super) fn take_color_slot(&mut self, gl: &mut dyn GlDriver, point: u32) -> Option<Attachment> {
        let key = self.color_slots.get_mut(point as usize)?.take()?;
        self.color_count -= 1;
        let attachment = self.attachments.remove(key)?;
        self.bind_framebuffers(gl);
        attachment.detach_from(gl, FramebufferTarget::Framebuffer, GL_COLOR_ATTACHMENT0 + point);
        glbind_debug!(SOURCE, "FBO #{} detached color {}: {}", self.handle, point, attachment);
        Some(attachment)
    }

    pub(super) fn dispose_color_slot(&mut self, gl: &mut dyn GlDriver, point: u32) -> bool {
        match self.take_color_slot(gl, point) {
            Some(mut attachment) => {
                attachment.free(gl);
                true
            }
            None => false,
        }
    }

    /// Remove depth and/or stencil from the framebuffer and the map
    pub(super) fn take_depth_stencil(&mut self, gl: &mut dyn GlDriver, kind: AttachmentKind) -> Vec<Attachment> {
        let layout = self.depth_stencil;
        let mut taken: Vec<(AttachmentKey, &'static [u32])> = Vec::new();
        if let DepthStencil::Packed(key) = layout {
            taken.push((key, attachment_points(AttachmentKind::DepthStencil)));
            self.depth_stencil = DepthStencil::None;
        } else {
            if kind.has_depth() {
                taken.extend(layout.depth().map(|key| (key, attachment_points(AttachmentKind::Depth))));
                self.depth_stencil = self.depth_stencil.without_depth();
            }
            if kind.has_stencil() {
                taken.extend(layout.stencil().map(|key| (key, attachment_points(AttachmentKind::Stencil))));
                self.depth_stencil = self.depth_stencil.without_stencil();
            }
        }
        if taken.is_empty() {
            return Vec::new();
        }

        self.bind_framebuffers(gl);
        let mut detached = Vec::with_capacity(taken.len());
        for (key, points) in taken {
            if let Some(attachment) = self.attachments.remove(key) {
                for point in points {
                    attachment.detach_from(gl, FramebufferTarget::Framebuffer, *point);
                }
                glbind_debug!(SOURCE, "FBO #{} detached {}", self.handle, attachment);
                detached.push(attachment);
            }
        }
        detached
    }

    pub(super) fn dispose_depth_stencil(&mut self, gl: &mut dyn GlDriver, kind: AttachmentKind) -> usize {
        let detached = self.take_depth_stencil(gl, kind);
        let count = detached.len();
        for mut attachment in detached {
            attachment.free(gl);
        }
        count
    }

    // ===== RECREATE =====

    /// Recreate the color attachment at `point` for the current size and samples
    ///
    /// Textures are resized in place; a texture on a multisampled FBO becomes a
    /// multisampled renderbuffer, and a multisampled renderbuffer on a
    /// single-sampled FBO becomes a texture (shaped after the resolve sink
    /// texture when there is one). Returns the key, which changes only on such
    /// a swap, or `None` for an empty slot.
    pub fn recreate_colorbuffer(&mut self, gl: &mut dyn GlDriver, point: u32) -> Result<Option<AttachmentKey>> {
        self.recreate_colorbuffer_impl(gl, point, StatusCheck::Immediate)
    }

    pub(super) fn recreate_colorbuffer_impl(
        &mut self,
        gl: &mut dyn GlDriver,
        point: u32,
        check: StatusCheck,
    ) -> Result<Option<AttachmentKey>> {
        self.require_initialized("recreate color")?;
        self.check_color_point(point)?;
        let Some(key) = self.colorbuffer_key(point) else {
            return Ok(None);
        };
        let (width, height, samples) = (self.width, self.height, self.samples);

        enum Plan {
            ResizeTexture,
            TextureToRenderbuffer { alpha: bool },
            RenderbufferToTexture { alpha: bool },
            RebuildRenderbuffer,
        }
        let plan = match &self.attachments[key] {
            Attachment::Texture(tex) if samples > 0 => Plan::TextureToRenderbuffer { alpha: formats::has_alpha(tex.format()) },
            Attachment::Texture(_) => Plan::ResizeTexture,
            Attachment::Render(rb) if rb.samples() > 0 && samples == 0 => {
                Plan::RenderbufferToTexture { alpha: formats::has_alpha(rb.format()) }
            }
            Attachment::Render(_) => Plan::RebuildRenderbuffer,
        };

        let key = match plan {
            Plan::TextureToRenderbuffer { alpha } => {
                self.dispose_color_slot(gl, point);
                self.attach_colorbuffer_impl(gl, point, alpha, false, check)?
            }
            Plan::RenderbufferToTexture { alpha } => {
                let texture = match self.resolve_sink_texture() {
                    Some(hint) => TextureAttachment::color(hint.format(), width, height, *hint.params()),
                    None => formats::color_texture(alpha, &self.caps, width, height),
                };
                self.dispose_color_slot(gl, point);
                self.attach_color_impl(gl, point, texture.into(), check)?
            }
            Plan::ResizeTexture | Plan::RebuildRenderbuffer => {
                self.bind_framebuffers(gl);
                let result = match &mut self.attachments[key] {
                    Attachment::Texture(tex) => tex.resize(gl, width, height),
                    Attachment::Render(rb) => {
                        rb.free(gl);
                        rb.set_size(width, height);
                        rb.set_samples(samples);
                        rb.initialize(gl).map(|_| ())
                    }
                };
                if let Err(err) = result {
                    glbind_warn!(SOURCE, "FBO #{} color {} recreate failed, detaching", self.handle, point);
                    self.dispose_color_slot(gl, point);
                    return Err(err);
                }
                self.attachments[key].attach_to(gl, FramebufferTarget::Framebuffer, GL_COLOR_ATTACHMENT0 + point);
                if check == StatusCheck::Immediate {
                    let context = format!("recreate color {}", point);
                    if let Err(err) = self.validate(gl, &context) {
                        self.dispose_color_slot(gl, point);
                        return Err(err);
                    }
                }
                key
            }
        };
        Ok(Some(key))
    }

    /// Recreate depth/stencil renderbuffers in place with their stored formats
    pub(super) fn recreate_depth_stencil(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        let (width, height, samples) = (self.width, self.height, self.samples);
        let layout = self.depth_stencil;
        if layout == DepthStencil::None {
            return Ok(());
        }
        self.bind_framebuffers(gl);

        for key in layout.keys() {
            let Some(Attachment::Render(rb)) = self.attachments.get_mut(key) else {
                return Err(glbind_err!(SOURCE, Internal,
                    "FBO #{} depth/stencil {:?} is not a renderbuffer", self.handle, key));
            };
            rb.free(gl);
            rb.set_size(width, height);
            rb.set_samples(samples);
            let kind = rb.kind();
            if let Err(err) = rb.initialize(gl) {
                glbind_warn!(SOURCE, "FBO #{} {} recreate failed, detaching depth and stencil", self.handle, kind);
                self.dispose_depth_stencil(gl, AttachmentKind::DepthStencil);
                return Err(err);
            }
            for &point in attachment_points(kind) {
                self.attachments[key].attach_to(gl, FramebufferTarget::Framebuffer, point);
            }
        }
        Ok(())
    }
}

/// GL attachment points served by a depth/stencil renderbuffer kind
fn attachment_points(kind: AttachmentKind) -> &'static [u32] {
    match kind {
        AttachmentKind::Depth => &[GL_DEPTH_ATTACHMENT],
        AttachmentKind::Stencil => &[GL_STENCIL_ATTACHMENT],
        AttachmentKind::DepthStencil => &[GL_DEPTH_ATTACHMENT, GL_STENCIL_ATTACHMENT],
        _ => &[],
    }
}

fn check_depth_stencil_kind(kind: AttachmentKind) -> Result<()> {
    match kind {
        AttachmentKind::Depth | AttachmentKind::Stencil | AttachmentKind::DepthStencil => Ok(()),
        _ => Err(glbind_err!(SOURCE, InvalidArgument, "{} is not a depth/stencil kind", kind)),
    }
}
