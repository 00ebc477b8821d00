/// Framebuffer object manager
///
/// An `Fbo` owns a native framebuffer, the attachments bound to it and, when
/// multisampled, a resolve sink: a second, single-sampled `Fbo` with one color
/// texture that receives the resolved image.
///
/// Lifecycle: `new` (uninitialized) → `init` → any number of attach/detach/
/// `reset` calls → `destroy`. Every method touching GPU state takes the driver of
/// the context current on the calling thread; an `Fbo` is never shared across
/// threads.
///
/// Completeness is re-checked after each mutating call unless the call runs in
/// a `StatusBatch`, which checks once in `finish`. Incomplete states are
/// accepted while the FBO does not yet hold both color and depth attachments.

use slotmap::SlotMap;
use crate::capabilities::FboCapabilities;
use crate::driver::gl_constants::*;
use crate::driver::{check_pre_gl_error, FramebufferTarget, GlDriver};
use crate::error::{Error, Result};
use crate::{glbind_bail, glbind_debug, glbind_error};
use super::attachment::{Attachment, AttachmentKey, SurfaceBits};
use super::status::FboStatus;
use super::texture_attachment::TextureAttachment;

pub(super) const SOURCE: &str = "glbind::Fbo";

// ===== DEPTH / STENCIL STATE =====

/// Depth and stencil attachments of an FBO
///
/// `Packed` is a single DEPTH_STENCIL renderbuffer bound to both points;
/// detaching either side detaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthStencil {
    #[default]
    None,
    Depth(AttachmentKey),
    Stencil(AttachmentKey),
    Separate { depth: AttachmentKey, stencil: AttachmentKey },
    Packed(AttachmentKey),
}

impl DepthStencil {
    pub fn depth(&self) -> Option<AttachmentKey> {
        match *self {
            DepthStencil::Depth(key) | DepthStencil::Packed(key) => Some(key),
            DepthStencil::Separate { depth, .. } => Some(depth),
            DepthStencil::None | DepthStencil::Stencil(_) => None,
        }
    }

    pub fn stencil(&self) -> Option<AttachmentKey> {
        match *self {
            DepthStencil::Stencil(key) | DepthStencil::Packed(key) => Some(key),
            DepthStencil::Separate { stencil, .. } => Some(stencil),
            DepthStencil::None | DepthStencil::Depth(_) => None,
        }
    }

    pub fn is_packed(&self) -> bool {
        matches!(self, DepthStencil::Packed(_))
    }

    /// Distinct attachment keys (one for `Packed`)
    pub fn keys(&self) -> Vec<AttachmentKey> {
        match *self {
            DepthStencil::None => Vec::new(),
            DepthStencil::Depth(key) | DepthStencil::Stencil(key) | DepthStencil::Packed(key) => vec![key],
            DepthStencil::Separate { depth, stencil } => vec![depth, stencil],
        }
    }

    pub(super) fn with_depth(self, key: AttachmentKey) -> Self {
        match self {
            DepthStencil::Stencil(stencil) => DepthStencil::Separate { depth: key, stencil },
            _ => DepthStencil::Depth(key),
        }
    }

    pub(super) fn with_stencil(self, key: AttachmentKey) -> Self {
        match self {
            DepthStencil::Depth(depth) => DepthStencil::Separate { depth, stencil: key },
            _ => DepthStencil::Stencil(key),
        }
    }

    pub(super) fn without_depth(self) -> Self {
        match self {
            DepthStencil::Separate { stencil, .. } => DepthStencil::Stencil(stencil),
            DepthStencil::Depth(_) | DepthStencil::Packed(_) => DepthStencil::None,
            other => other,
        }
    }

    pub(super) fn without_stencil(self) -> Self {
        match self {
            DepthStencil::Separate { depth, .. } => DepthStencil::Depth(depth),
            DepthStencil::Stencil(_) | DepthStencil::Packed(_) => DepthStencil::None,
            other => other,
        }
    }
}

/// When completeness is checked after a mutating call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StatusCheck {
    Immediate,
    Deferred,
}

// ===== FBO =====

pub struct Fbo {
    pub(super) caps: FboCapabilities,
    pub(super) initialized: bool,
    pub(super) max_color_attachments: u32,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) samples: u32,
    pub(super) handle: u32,
    pub(super) attachments: SlotMap<AttachmentKey, Attachment>,
    pub(super) color_slots: Vec<Option<AttachmentKey>>,
    pub(super) color_count: usize,
    pub(super) depth_stencil: DepthStencil,
    pub(super) status: FboStatus,
    pub(super) bound: bool,
    pub(super) resolve_sink: Option<Box<Fbo>>,
    pub(super) resolve_sink_dirty: bool,
}

impl Fbo {
    /// Uninitialized FBO using `caps` for every later decision
    pub fn new(caps: FboCapabilities) -> Self {
        Self {
            caps,
            initialized: false,
            max_color_attachments: 0,
            width: 0,
            height: 0,
            samples: 0,
            handle: 0,
            attachments: SlotMap::with_key(),
            color_slots: Vec::new(),
            color_count: 0,
            depth_stencil: DepthStencil::None,
            status: FboStatus::NotAFbo,
            bound: false,
            resolve_sink: None,
            resolve_sink_dirty: false,
        }
    }

    // ===== LIFECYCLE =====

    /// Create the native framebuffer
    ///
    /// Width and height are clamped to at least 1; `samples` is clamped to the
    /// device maximum. A multisampled FBO also creates its resolve sink. The
    /// FBO is left bound.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if already initialized
    /// - `InitializationFailed` if the device has no FBO support
    /// - `SizeExceeded` if the size is above the device limits
    /// - `Driver` if a GL error is pending
    pub fn init(&mut self, gl: &mut dyn GlDriver, width: u32, height: u32, samples: u32) -> Result<()> {
        if self.initialized {
            glbind_bail!(SOURCE, InvalidState, "FBO #{} already initialized", self.handle);
        }
        if !self.caps.basic_fbo_support {
            glbind_bail!(SOURCE, InitializationFailed, "framebuffer objects are not supported");
        }
        let (width, height) = (width.max(1), height.max(1));
        self.check_size(width, height)?;
        check_pre_gl_error(gl, "FBO init")?;

        self.max_color_attachments = self.caps.capped_color_attachments();
        self.width = width;
        self.height = height;
        self.samples = samples.min(self.max_samples());
        self.color_slots = vec![None; self.max_color_attachments as usize];
        self.color_count = 0;
        self.depth_stencil = DepthStencil::None;

        self.handle = gl.create_framebuffer()?;
        self.initialized = true;
        self.status = FboStatus::IncompleteMissingAttachment;

        if self.samples > 0 {
            if let Err(err) = self.create_resolve_sink(gl, width, height) {
                gl.delete_framebuffer(self.handle);
                self.handle = 0;
                self.initialized = false;
                self.status = FboStatus::NotAFbo;
                return Err(err);
            }
        }
        self.bind_framebuffers(gl);

        glbind_debug!(SOURCE, "init FBO #{} {}x{} samples {} (max color {}, max samples {})",
            self.handle, self.width, self.height, self.samples,
            self.max_color_attachments, self.max_samples());
        Ok(())
    }

    /// Resize and/or change the sample count, keeping attachment identity
    ///
    /// Initializes the FBO when needed and does nothing when size and samples
    /// are unchanged. Every attachment is recreated in place under one batch;
    /// a configuration that ends up invalid disposes all attachments and
    /// fails. The resolve sink is created, adjusted or torn down to follow the
    /// new sample count, and the bound state is restored.
    pub fn reset(&mut self, gl: &mut dyn GlDriver, width: u32, height: u32, samples: u32) -> Result<()> {
        if !self.initialized {
            return self.init(gl, width, height, samples);
        }
        let (width, height) = (width.max(1), height.max(1));
        let samples = samples.min(self.max_samples());
        if width == self.width && height == self.height && samples == self.samples {
            return Ok(());
        }
        self.check_size(width, height)?;

        let was_bound = self.is_bound(gl);
        glbind_debug!(SOURCE, "reset FBO #{} {}x{} samples {} -> {}x{} samples {}",
            self.handle, self.width, self.height, self.samples, width, height, samples);

        // sink first: a failure here leaves size and samples untouched
        if samples > 0 && self.resolve_sink.is_none() {
            self.create_resolve_sink(gl, width, height)?;
        }
        self.width = width;
        self.height = height;
        self.samples = samples;

        let mut batch = self.batch();
        batch.recreate_all(gl)?;
        batch.finish(gl)?;

        self.reset_resolve_sink(gl)?;
        self.resolve_sink_dirty = true;

        if was_bound {
            self.bind_framebuffers(gl);
        } else {
            self.unbind(gl);
        }
        Ok(())
    }

    /// Release the resolve sink, every attachment and the native framebuffer
    ///
    /// The FBO returns to the uninitialized state and may be initialized again.
    pub fn destroy(&mut self, gl: &mut dyn GlDriver) {
        if !self.initialized {
            return;
        }
        glbind_debug!(SOURCE, "destroy FBO #{}", self.handle);

        if let Some(mut sink) = self.resolve_sink.take() {
            sink.destroy(gl);
        }
        self.dispose_own_attachments(gl);
        self.unbind(gl);

        gl.delete_framebuffer(self.handle);
        self.handle = 0;
        self.color_slots.clear();
        self.status = FboStatus::NotAFbo;
        self.initialized = false;
        self.resolve_sink_dirty = false;
    }

    // ===== BINDING =====

    /// Bind for rendering
    ///
    /// A multisampled FBO is bound for drawing with its resolve sink bound for
    /// reading. Binding marks the resolve sink dirty.
    pub fn bind(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        self.require_initialized("bind")?;
        self.bind_framebuffers(gl);
        Ok(())
    }

    /// Restore the default framebuffer bindings if this FBO is bound
    pub fn unbind(&mut self, gl: &mut dyn GlDriver) {
        if self.bound {
            self.restore_default_bindings(gl);
        }
    }

    /// Forget the bound state after the application rebound framebuffers itself
    pub fn mark_unbound(&mut self) {
        self.bound = false;
    }

    /// Bound flag, confirmed against the driver's draw binding
    pub fn is_bound(&self, gl: &mut dyn GlDriver) -> bool {
        self.bound && gl.framebuffer_binding(FramebufferTarget::Draw) == self.handle
    }

    /// Bind a color texture of this FBO to GL_TEXTURE_2D after unbinding the FBO
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is not one of this FBO's color textures.
    pub fn use_texture(&mut self, gl: &mut dyn GlDriver, key: AttachmentKey) -> Result<()> {
        let handle = match self.attachments.get(key) {
            Some(Attachment::Texture(tex)) if self.color_slots.contains(&Some(key)) => tex.handle(),
            _ => glbind_bail!(SOURCE, InvalidArgument, "{:?} is not a color texture of FBO #{}", key, self.handle),
        };
        self.unbind(gl);
        gl.bind_texture(GL_TEXTURE_2D, handle);
        Ok(())
    }

    /// Bind the texture holding the rendered image
    ///
    /// Multisampled FBOs resolve into their sink first and bind the sink
    /// texture; single-sampled FBOs bind their color texture at point 0.
    pub fn use_resolve_sink(&mut self, gl: &mut dyn GlDriver) -> Result<()> {
        self.require_initialized("use_resolve_sink")?;
        if self.samples == 0 {
            let key = match self.color_slots.first().copied().flatten() {
                Some(key) => key,
                None => glbind_bail!(SOURCE, InvalidState, "FBO #{} has no color attachment 0", self.handle),
            };
            return self.use_texture(gl, key);
        }
        self.sync_resolve_sink(gl)?;
        let handle = self.resolve_sink_texture().map(TextureAttachment::handle).unwrap_or(0);
        if handle == 0 {
            return Err(crate::glbind_err!(SOURCE, Internal,
                "resolve sink of FBO #{} has no texture after sync", self.handle));
        }
        gl.bind_texture(GL_TEXTURE_2D, handle);
        Ok(())
    }

    /// Unbind the FBO and the 2D texture binding
    pub fn unuse(&mut self, gl: &mut dyn GlDriver) {
        self.unbind(gl);
        gl.bind_texture(GL_TEXTURE_2D, 0);
    }

    // ===== STATUS =====

    pub fn status(&self) -> FboStatus {
        self.status
    }

    pub fn status_string(&self) -> String {
        self.status.to_string()
    }

    /// Whether the last queried status is acceptable for the current attachments
    pub fn is_status_valid(&self) -> bool {
        self.status.is_valid_for(self.color_count, self.depth_stencil.depth().is_some())
    }

    /// Re-query completeness (binds the FBO) and return the new status
    pub fn update_status(&mut self, gl: &mut dyn GlDriver) -> FboStatus {
        if !self.initialized {
            self.status = FboStatus::NotAFbo;
        } else {
            self.bind_framebuffers(gl);
            self.status = FboStatus::from_gl(gl.check_framebuffer_status(FramebufferTarget::Framebuffer));
        }
        self.status
    }

    // ===== ACCESSORS =====

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn capabilities(&self) -> &FboCapabilities {
        &self.caps
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

    /// Sample limit honored by `init`/`reset` (0 without full FBO support)
    pub fn max_samples(&self) -> u32 {
        if self.caps.full_fbo_support {
            self.caps.max_samples
        } else {
            0
        }
    }

    pub fn max_color_attachments(&self) -> u32 {
        self.max_color_attachments
    }

    /// Native framebuffer name (0 when not initialized)
    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Framebuffer to read the rendered image from (the sink when multisampled)
    pub fn read_framebuffer(&self) -> u32 {
        match &self.resolve_sink {
            Some(sink) if self.samples > 0 => sink.handle,
            _ => self.handle,
        }
    }

    /// Framebuffer rendering goes to
    pub fn write_framebuffer(&self) -> u32 {
        self.handle
    }

    pub fn color_attachment_count(&self) -> usize {
        self.color_count
    }

    pub fn texture_attachment_count(&self) -> usize {
        self.color_slots
            .iter()
            .flatten()
            .filter(|key| matches!(self.attachments.get(**key), Some(Attachment::Texture(_))))
            .count()
    }

    pub fn colorbuffer_key(&self, point: u32) -> Option<AttachmentKey> {
        self.color_slots.get(point as usize).copied().flatten()
    }

    pub fn colorbuffer(&self, point: u32) -> Option<&Attachment> {
        self.colorbuffer_key(point).and_then(|key| self.attachments.get(key))
    }

    pub fn attachment(&self, key: AttachmentKey) -> Option<&Attachment> {
        self.attachments.get(key)
    }

    pub fn depth_stencil(&self) -> DepthStencil {
        self.depth_stencil
    }

    pub fn depth_attachment(&self) -> Option<&Attachment> {
        self.depth_stencil.depth().and_then(|key| self.attachments.get(key))
    }

    pub fn stencil_attachment(&self) -> Option<&Attachment> {
        self.depth_stencil.stencil().and_then(|key| self.attachments.get(key))
    }

    pub fn has_depth(&self) -> bool {
        self.depth_stencil.depth().is_some()
    }

    pub fn has_stencil(&self) -> bool {
        self.depth_stencil.stencil().is_some()
    }

    pub fn is_depth_stencil_packed(&self) -> bool {
        self.depth_stencil.is_packed()
    }

    pub fn resolve_sink(&self) -> Option<&Fbo> {
        self.resolve_sink.as_deref()
    }

    /// Color texture of the resolve sink
    pub fn resolve_sink_texture(&self) -> Option<&TextureAttachment> {
        self.resolve_sink.as_deref().and_then(|sink| sink.colorbuffer(0)).and_then(Attachment::as_texture)
    }

    pub fn is_resolve_sink_dirty(&self) -> bool {
        self.resolve_sink_dirty
    }

    /// Aggregate bit depths: color point 0, depth, stencil and samples
    pub fn surface_bits(&self) -> SurfaceBits {
        let color = self.colorbuffer(0).map(Attachment::describe).unwrap_or_default();
        let depth = self.depth_attachment().map(|a| a.describe().depth).unwrap_or(0);
        let stencil = self.stencil_attachment().map(|a| a.describe().stencil).unwrap_or(0);
        SurfaceBits { depth, stencil, samples: self.samples, ..color }
    }

    // ===== INTERNALS =====

    pub(super) fn require_initialized(&self, operation: &str) -> Result<()> {
        if !self.initialized {
            glbind_bail!(SOURCE, InvalidState, "{} on an uninitialized FBO", operation);
        }
        Ok(())
    }

    pub(super) fn check_size(&self, width: u32, height: u32) -> Result<()> {
        if self.caps.fits(width, height) {
            return Ok(());
        }
        glbind_error!(SOURCE, "size {}x{} exceeds limits (texture {}, renderbuffer {})",
            width, height, self.caps.max_texture_size, self.caps.max_renderbuffer_size);
        Err(Error::SizeExceeded {
            width,
            height,
            max_texture_size: self.caps.max_texture_size,
            max_renderbuffer_size: self.caps.max_renderbuffer_size,
        })
    }

    /// Bind the native framebuffer(s) unless already bound
    pub(super) fn bind_framebuffers(&mut self, gl: &mut dyn GlDriver) {
        if self.bound && gl.framebuffer_binding(FramebufferTarget::Draw) == self.handle {
            return;
        }
        match &self.resolve_sink {
            Some(sink) if self.samples > 0 && self.caps.full_fbo_support => {
                gl.bind_framebuffer(FramebufferTarget::Draw, self.handle);
                gl.bind_framebuffer(FramebufferTarget::Read, sink.handle);
            }
            _ => gl.bind_framebuffer(FramebufferTarget::Framebuffer, self.handle),
        }
        self.bound = true;
        self.resolve_sink_dirty = true;
    }

    pub(super) fn restore_default_bindings(&mut self, gl: &mut dyn GlDriver) {
        if self.caps.full_fbo_support {
            gl.bind_framebuffer(FramebufferTarget::Draw, 0);
            gl.bind_framebuffer(FramebufferTarget::Read, 0);
        } else {
            gl.bind_framebuffer(FramebufferTarget::Framebuffer, 0);
        }
        self.bound = false;
        if let Some(sink) = self.resolve_sink.as_deref_mut() {
            sink.bound = false;
        }
    }

    /// Check completeness and fail with a `Status` error when invalid
    pub(super) fn validate(&mut self, gl: &mut dyn GlDriver, context: &str) -> Result<()> {
        self.update_status(gl);
        if self.is_status_valid() {
            return Ok(());
        }
        glbind_error!(SOURCE, "FBO #{} {}: {}", self.handle, context, self.status);
        Err(Error::Status { status: self.status, message: format!("FBO #{} {}", self.handle, context) })
    }

    /// Format of the depth attachment, if any
    pub(super) fn depth_format(&self) -> Option<u32> {
        self.depth_attachment().map(Attachment::format)
    }

    /// Format of the stencil attachment, if any
    pub(super) fn stencil_format(&self) -> Option<u32> {
        self.stencil_attachment().map(Attachment::format)
    }
}

impl Default for Fbo {
    fn default() -> Self {
        Self::new(FboCapabilities::default())
    }
}

impl std::fmt::Debug for Fbo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fbo")
            .field("handle", &self.handle)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("samples", &self.samples)
            .field("color_count", &self.color_count)
            .field("depth_stencil", &self.depth_stencil)
            .field("status", &self.status)
            .field("bound", &self.bound)
            .field("resolve_sink", &self.resolve_sink)
            .finish()
    }
}

#[cfg(test)]
#[path = "fbo_tests.rs"]
mod tests;
