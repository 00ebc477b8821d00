/// Mock GL driver for unit and integration tests (no GPU required)
///
/// Simulates GL object tables, framebuffer bindings and attachment points, and
/// evaluates completeness the way a conformant driver would for the cases the
/// FBO manager exercises. Errors can be queued or injected into the next
/// storage allocation, and the completeness status can be forced.

use std::collections::{BTreeMap, VecDeque};
use rustc_hash::FxHashMap;
use crate::driver::gl_constants::*;
use crate::driver::gl_driver::{BlitRect, BufferMask, FramebufferTarget, GlDriver};
use crate::error::Result;

// ============================================================================
// Mock objects
// ============================================================================

/// Image attached to a framebuffer attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockImage {
    Renderbuffer(u32),
    Texture(u32),
}

/// Storage allocated for a renderbuffer or texture level 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockStorage {
    pub internal_format: u32,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
}

#[derive(Debug, Default)]
struct MockFramebuffer {
    attachments: BTreeMap<u32, MockImage>,
}

#[derive(Debug, Default)]
struct MockTexture {
    storage: Option<MockStorage>,
    parameters: FxHashMap<u32, i32>,
}

/// Recorded driver call (the subset tests assert on)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    BindFramebuffer { target: FramebufferTarget, framebuffer: u32 },
    /// Attachment change on the framebuffer bound for drawing (`image == None` detaches)
    Attach { framebuffer: u32, attachment: u32, image: Option<MockImage> },
    Blit { read: u32, draw: u32, src: BlitRect, dst: BlitRect, mask: BufferMask, filter: u32 },
    DeleteFramebuffer(u32),
    DeleteRenderbuffer(u32),
    DeleteTexture(u32),
}

// ============================================================================
// Mock driver
// ============================================================================

pub struct MockDriver {
    next_name: u32,
    framebuffers: FxHashMap<u32, MockFramebuffer>,
    renderbuffers: FxHashMap<u32, Option<MockStorage>>,
    textures: FxHashMap<u32, MockTexture>,
    draw_binding: u32,
    read_binding: u32,
    renderbuffer_binding: u32,
    texture_binding: u32,
    pending_errors: VecDeque<u32>,
    fail_next_allocation: Option<u32>,
    forced_status: Option<u32>,
    integers: FxHashMap<u32, i32>,
    strings: FxHashMap<u32, String>,
    extensions: Vec<String>,
    calls: Vec<MockCall>,
}

impl MockDriver {
    /// Bare driver with the given identification strings and limits
    pub fn new(version: &str, renderer: &str, extensions: &[&str]) -> Self {
        let mut strings = FxHashMap::default();
        strings.insert(GL_VERSION, version.to_string());
        strings.insert(GL_RENDERER, renderer.to_string());
        strings.insert(GL_VENDOR, "Mock Vendor".to_string());

        let mut driver = Self {
            next_name: 1,
            framebuffers: FxHashMap::default(),
            renderbuffers: FxHashMap::default(),
            textures: FxHashMap::default(),
            draw_binding: 0,
            read_binding: 0,
            renderbuffer_binding: 0,
            texture_binding: 0,
            pending_errors: VecDeque::new(),
            fail_next_allocation: None,
            forced_status: None,
            integers: FxHashMap::default(),
            strings,
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            calls: Vec::new(),
        };
        driver.set_limits(8, 8, 8192, 8192);
        driver
    }

    /// Desktop OpenGL 4.6 core on a hardware rasterizer
    pub fn desktop() -> Self {
        let mut driver = Self::new("4.6.0 Mock 1.0", "Mock GPU", &["GL_ARB_framebuffer_object"]);
        driver.set_integer(GL_CONTEXT_PROFILE_MASK, GL_CONTEXT_CORE_PROFILE_BIT);
        driver
    }

    /// OpenGL ES 2.0 with only basic FBO support
    pub fn gles2() -> Self {
        let mut driver = Self::new("OpenGL ES 2.0 Mock", "Mock Mobile GPU", &["GL_OES_rgb8_rgba8"]);
        driver.set_limits(1, 0, 2048, 2048);
        driver
    }

    /// Desktop OpenGL on Mesa's llvmpipe
    pub fn software() -> Self {
        let mut driver = Self::new(
            "4.5 (Core Profile) Mesa 23.1.4",
            "llvmpipe (LLVM 15.0.7, 256 bits)",
            &["GL_ARB_framebuffer_object"],
        );
        driver.set_integer(GL_CONTEXT_PROFILE_MASK, GL_CONTEXT_CORE_PROFILE_BIT);
        driver
    }

    pub fn set_integer(&mut self, pname: u32, value: i32) {
        self.integers.insert(pname, value);
    }

    pub fn set_limits(&mut self, max_color_attachments: i32, max_samples: i32, max_texture_size: i32, max_renderbuffer_size: i32) {
        self.integers.insert(GL_MAX_COLOR_ATTACHMENTS, max_color_attachments);
        self.integers.insert(GL_MAX_SAMPLES, max_samples);
        self.integers.insert(GL_MAX_TEXTURE_SIZE, max_texture_size);
        self.integers.insert(GL_MAX_RENDERBUFFER_SIZE, max_renderbuffer_size);
    }

    // ===== FAULT INJECTION =====

    /// Queue an error as if a previous unrelated call had failed
    pub fn push_error(&mut self, code: u32) {
        self.pending_errors.push_back(code);
    }

    /// Make the next renderbuffer/texture storage allocation raise `code`
    pub fn fail_next_allocation(&mut self, code: u32) {
        self.fail_next_allocation = Some(code);
    }

    /// Override the status returned by glCheckFramebufferStatus
    pub fn force_status(&mut self, status: Option<u32>) {
        self.forced_status = status;
    }

    // ===== INSPECTION =====

    pub fn calls(&self) -> &[MockCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn live_framebuffers(&self) -> usize {
        self.framebuffers.len()
    }

    pub fn live_renderbuffers(&self) -> usize {
        self.renderbuffers.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn renderbuffer_storage_of(&self, renderbuffer: u32) -> Option<MockStorage> {
        self.renderbuffers.get(&renderbuffer).copied().flatten()
    }

    pub fn texture_storage_of(&self, texture: u32) -> Option<MockStorage> {
        self.textures.get(&texture).and_then(|t| t.storage)
    }

    pub fn texture_parameter(&self, texture: u32, pname: u32) -> Option<i32> {
        self.textures.get(&texture).and_then(|t| t.parameters.get(&pname).copied())
    }

    pub fn attachment_of(&self, framebuffer: u32, attachment: u32) -> Option<MockImage> {
        self.framebuffers.get(&framebuffer).and_then(|fb| fb.attachments.get(&attachment).copied())
    }

    pub fn draw_binding(&self) -> u32 {
        self.draw_binding
    }

    pub fn read_binding(&self) -> u32 {
        self.read_binding
    }

    pub fn texture_binding(&self) -> u32 {
        self.texture_binding
    }

    // ===== INTERNALS =====

    fn gen_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    fn raise(&mut self, code: u32) {
        self.pending_errors.push_back(code);
    }

    fn take_injected_failure(&mut self) -> bool {
        match self.fail_next_allocation.take() {
            Some(code) => {
                self.raise(code);
                true
            }
            None => false,
        }
    }

    fn bound_for(&self, target: FramebufferTarget) -> u32 {
        match target {
            FramebufferTarget::Framebuffer | FramebufferTarget::Draw => self.draw_binding,
            FramebufferTarget::Read => self.read_binding,
        }
    }

    fn image_storage(&self, image: MockImage) -> Option<MockStorage> {
        match image {
            MockImage::Renderbuffer(name) => self.renderbuffer_storage_of(name),
            MockImage::Texture(name) => self.texture_storage_of(name),
        }
    }

    fn set_attachment(&mut self, target: FramebufferTarget, attachment: u32, image: Option<MockImage>) {
        let framebuffer = self.bound_for(target);
        let Some(fb) = self.framebuffers.get_mut(&framebuffer) else {
            self.raise(GL_INVALID_OPERATION);
            return;
        };
        match image {
            Some(image) => {
                fb.attachments.insert(attachment, image);
            }
            None => {
                fb.attachments.remove(&attachment);
            }
        }
        self.calls.push(MockCall::Attach { framebuffer, attachment, image });
    }

    fn evaluate_status(&self, framebuffer: u32) -> u32 {
        if framebuffer == 0 {
            return GL_FRAMEBUFFER_COMPLETE;
        }
        let Some(fb) = self.framebuffers.get(&framebuffer) else {
            return GL_FRAMEBUFFER_UNDEFINED;
        };
        if fb.attachments.is_empty() {
            return GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT;
        }
        let mut storages = Vec::with_capacity(fb.attachments.len());
        for image in fb.attachments.values() {
            match self.image_storage(*image) {
                Some(storage) => storages.push(storage),
                None => return GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
            }
        }
        let first = storages[0];
        if storages.iter().any(|s| s.width != first.width || s.height != first.height) {
            return GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS;
        }
        if storages.iter().any(|s| s.samples != first.samples) {
            return GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE;
        }
        GL_FRAMEBUFFER_COMPLETE
    }

    fn check_storage_size(&mut self, width: u32, height: u32, limit: u32) -> bool {
        let max = self.integers.get(&limit).copied().unwrap_or(0).max(0) as u32;
        if width > max || height > max {
            self.raise(GL_INVALID_VALUE);
            return false;
        }
        true
    }
}

impl GlDriver for MockDriver {
    fn get_error(&mut self) -> u32 {
        self.pending_errors.pop_front().unwrap_or(GL_NO_ERROR)
    }

    fn get_integer(&mut self, pname: u32) -> i32 {
        match pname {
            GL_DRAW_FRAMEBUFFER_BINDING => self.draw_binding as i32,
            GL_READ_FRAMEBUFFER_BINDING => self.read_binding as i32,
            _ => self.integers.get(&pname).copied().unwrap_or(0),
        }
    }

    fn get_string(&mut self, name: u32) -> Option<String> {
        self.strings.get(&name).cloned()
    }

    fn extensions(&mut self) -> Vec<String> {
        self.extensions.clone()
    }

    fn create_framebuffer(&mut self) -> Result<u32> {
        let name = self.gen_name();
        self.framebuffers.insert(name, MockFramebuffer::default());
        Ok(name)
    }

    fn delete_framebuffer(&mut self, framebuffer: u32) {
        if self.framebuffers.remove(&framebuffer).is_some() {
            if self.draw_binding == framebuffer {
                self.draw_binding = 0;
            }
            if self.read_binding == framebuffer {
                self.read_binding = 0;
            }
            self.calls.push(MockCall::DeleteFramebuffer(framebuffer));
        }
    }

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: u32) {
        if framebuffer != 0 && !self.framebuffers.contains_key(&framebuffer) {
            self.raise(GL_INVALID_OPERATION);
            return;
        }
        match target {
            FramebufferTarget::Framebuffer => {
                self.draw_binding = framebuffer;
                self.read_binding = framebuffer;
            }
            FramebufferTarget::Draw => self.draw_binding = framebuffer,
            FramebufferTarget::Read => self.read_binding = framebuffer,
        }
        self.calls.push(MockCall::BindFramebuffer { target, framebuffer });
    }

    fn check_framebuffer_status(&mut self, target: FramebufferTarget) -> u32 {
        if let Some(status) = self.forced_status {
            return status;
        }
        self.evaluate_status(self.bound_for(target))
    }

    fn framebuffer_renderbuffer(&mut self, target: FramebufferTarget, attachment: u32, renderbuffer: u32) {
        let image = (renderbuffer != 0).then_some(MockImage::Renderbuffer(renderbuffer));
        self.set_attachment(target, attachment, image);
    }

    fn framebuffer_texture_2d(
        &mut self,
        target: FramebufferTarget,
        attachment: u32,
        _texture_target: u32,
        texture: u32,
        _level: i32,
    ) {
        let image = (texture != 0).then_some(MockImage::Texture(texture));
        self.set_attachment(target, attachment, image);
    }

    fn blit_framebuffer(&mut self, src: BlitRect, dst: BlitRect, mask: BufferMask, filter: u32) {
        let (read, draw) = (self.read_binding, self.draw_binding);
        if self.evaluate_status(read) != GL_FRAMEBUFFER_COMPLETE
            || self.evaluate_status(draw) != GL_FRAMEBUFFER_COMPLETE
        {
            self.raise(GL_INVALID_FRAMEBUFFER_OPERATION);
        }
        self.calls.push(MockCall::Blit { read, draw, src, dst, mask, filter });
    }

    fn create_renderbuffer(&mut self) -> Result<u32> {
        let name = self.gen_name();
        self.renderbuffers.insert(name, None);
        Ok(name)
    }

    fn delete_renderbuffer(&mut self, renderbuffer: u32) {
        if self.renderbuffers.remove(&renderbuffer).is_some() {
            if self.renderbuffer_binding == renderbuffer {
                self.renderbuffer_binding = 0;
            }
            self.calls.push(MockCall::DeleteRenderbuffer(renderbuffer));
        }
    }

    fn bind_renderbuffer(&mut self, renderbuffer: u32) {
        self.renderbuffer_binding = renderbuffer;
    }

    fn renderbuffer_storage(&mut self, internal_format: u32, width: u32, height: u32) {
        self.renderbuffer_storage_multisample(0, internal_format, width, height);
    }

    fn renderbuffer_storage_multisample(&mut self, samples: u32, internal_format: u32, width: u32, height: u32) {
        if self.take_injected_failure() {
            return;
        }
        if !self.check_storage_size(width, height, GL_MAX_RENDERBUFFER_SIZE) {
            return;
        }
        let max_samples = self.integers.get(&GL_MAX_SAMPLES).copied().unwrap_or(0).max(0) as u32;
        if samples > max_samples {
            self.raise(GL_INVALID_VALUE);
            return;
        }
        let bound = self.renderbuffer_binding;
        match self.renderbuffers.get_mut(&bound) {
            Some(storage) => {
                *storage = Some(MockStorage { internal_format, width, height, samples });
            }
            None => self.raise(GL_INVALID_OPERATION),
        }
    }

    fn create_texture(&mut self) -> Result<u32> {
        let name = self.gen_name();
        self.textures.insert(name, MockTexture::default());
        Ok(name)
    }

    fn delete_texture(&mut self, texture: u32) {
        if self.textures.remove(&texture).is_some() {
            if self.texture_binding == texture {
                self.texture_binding = 0;
            }
            self.calls.push(MockCall::DeleteTexture(texture));
        }
    }

    fn bind_texture(&mut self, _target: u32, texture: u32) {
        self.texture_binding = texture;
    }

    fn tex_parameter(&mut self, _target: u32, pname: u32, value: i32) {
        let bound = self.texture_binding;
        match self.textures.get_mut(&bound) {
            Some(texture) => {
                texture.parameters.insert(pname, value);
            }
            None => self.raise(GL_INVALID_OPERATION),
        }
    }

    fn tex_image_2d(
        &mut self,
        _target: u32,
        _level: i32,
        internal_format: u32,
        width: u32,
        height: u32,
        _data_format: u32,
        _data_type: u32,
    ) {
        if self.take_injected_failure() {
            return;
        }
        if !self.check_storage_size(width, height, GL_MAX_TEXTURE_SIZE) {
            return;
        }
        let bound = self.texture_binding;
        match self.textures.get_mut(&bound) {
            Some(texture) => {
                texture.storage = Some(MockStorage { internal_format, width, height, samples: 0 });
            }
            None => self.raise(GL_INVALID_OPERATION),
        }
    }
}

#[cfg(test)]
#[path = "mock_driver_tests.rs"]
mod tests;
