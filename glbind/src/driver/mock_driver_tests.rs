/// Unit tests for MockDriver
///
/// The FBO tests rely on the mock behaving like a conformant driver, so its
/// completeness evaluation and fault injection are checked on their own here.

use crate::driver::gl_constants::*;
use crate::driver::mock_driver::*;
use crate::driver::{BlitRect, BufferMask, FramebufferTarget, GlDriver};

fn renderbuffer(gl: &mut MockDriver, format: u32, width: u32, height: u32, samples: u32) -> u32 {
    let rb = gl.create_renderbuffer().unwrap();
    gl.bind_renderbuffer(rb);
    gl.renderbuffer_storage_multisample(samples, format, width, height);
    rb
}

// ============================================================================
// IDENTIFICATION
// ============================================================================

#[test]
fn test_presets_report_strings_and_limits() {
    let mut gl = MockDriver::desktop();
    assert_eq!(gl.get_string(GL_VERSION).unwrap(), "4.6.0 Mock 1.0");
    assert_eq!(gl.get_integer(GL_MAX_SAMPLES), 8);

    let mut gl = MockDriver::gles2();
    assert!(gl.get_string(GL_VERSION).unwrap().starts_with("OpenGL ES 2.0"));
    assert_eq!(gl.get_integer(GL_MAX_COLOR_ATTACHMENTS), 1);
    assert_eq!(gl.extensions(), vec!["GL_OES_rgb8_rgba8".to_string()]);

    let mut gl = MockDriver::software();
    assert!(gl.get_string(GL_RENDERER).unwrap().contains("llvmpipe"));
}

// ============================================================================
// BINDINGS
// ============================================================================

#[test]
fn test_bind_framebuffer_targets() {
    let mut gl = MockDriver::desktop();
    let a = gl.create_framebuffer().unwrap();
    let b = gl.create_framebuffer().unwrap();

    gl.bind_framebuffer(FramebufferTarget::Framebuffer, a);
    assert_eq!(gl.framebuffer_binding(FramebufferTarget::Draw), a);
    assert_eq!(gl.framebuffer_binding(FramebufferTarget::Read), a);

    gl.bind_framebuffer(FramebufferTarget::Read, b);
    assert_eq!(gl.draw_binding(), a);
    assert_eq!(gl.read_binding(), b);
}

#[test]
fn test_bind_unknown_framebuffer_raises() {
    let mut gl = MockDriver::desktop();
    gl.bind_framebuffer(FramebufferTarget::Framebuffer, 77);
    assert_eq!(gl.get_error(), GL_INVALID_OPERATION);
    assert_eq!(gl.get_error(), GL_NO_ERROR);
}

#[test]
fn test_delete_bound_framebuffer_reverts_to_default() {
    let mut gl = MockDriver::desktop();
    let fb = gl.create_framebuffer().unwrap();
    gl.bind_framebuffer(FramebufferTarget::Framebuffer, fb);
    gl.delete_framebuffer(fb);
    assert_eq!(gl.draw_binding(), 0);
    assert_eq!(gl.read_binding(), 0);
    assert_eq!(gl.live_framebuffers(), 0);
}

// ============================================================================
// COMPLETENESS
// ============================================================================

#[test]
fn test_status_missing_attachment() {
    let mut gl = MockDriver::desktop();
    let fb = gl.create_framebuffer().unwrap();
    gl.bind_framebuffer(FramebufferTarget::Framebuffer, fb);
    assert_eq!(
        gl.check_framebuffer_status(FramebufferTarget::Framebuffer),
        GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT
    );
}

#[test]
fn test_status_complete_and_dimension_mismatch() {
    let mut gl = MockDriver::desktop();
    let fb = gl.create_framebuffer().unwrap();
    gl.bind_framebuffer(FramebufferTarget::Framebuffer, fb);

    let color = renderbuffer(&mut gl, GL_RGBA8, 64, 64, 0);
    gl.framebuffer_renderbuffer(FramebufferTarget::Framebuffer, GL_COLOR_ATTACHMENT0, color);
    assert_eq!(gl.check_framebuffer_status(FramebufferTarget::Framebuffer), GL_FRAMEBUFFER_COMPLETE);

    let depth = renderbuffer(&mut gl, GL_DEPTH_COMPONENT24, 32, 32, 0);
    gl.framebuffer_renderbuffer(FramebufferTarget::Framebuffer, GL_DEPTH_ATTACHMENT, depth);
    assert_eq!(
        gl.check_framebuffer_status(FramebufferTarget::Framebuffer),
        GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS
    );

    gl.framebuffer_renderbuffer(FramebufferTarget::Framebuffer, GL_DEPTH_ATTACHMENT, 0);
    assert_eq!(gl.attachment_of(fb, GL_DEPTH_ATTACHMENT), None);
    assert_eq!(gl.check_framebuffer_status(FramebufferTarget::Framebuffer), GL_FRAMEBUFFER_COMPLETE);
}

#[test]
fn test_status_sample_mismatch() {
    let mut gl = MockDriver::desktop();
    let fb = gl.create_framebuffer().unwrap();
    gl.bind_framebuffer(FramebufferTarget::Framebuffer, fb);

    let color = renderbuffer(&mut gl, GL_RGBA8, 16, 16, 4);
    let depth = renderbuffer(&mut gl, GL_DEPTH_COMPONENT24, 16, 16, 0);
    gl.framebuffer_renderbuffer(FramebufferTarget::Framebuffer, GL_COLOR_ATTACHMENT0, color);
    gl.framebuffer_renderbuffer(FramebufferTarget::Framebuffer, GL_DEPTH_ATTACHMENT, depth);
    assert_eq!(
        gl.check_framebuffer_status(FramebufferTarget::Framebuffer),
        GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE
    );
}

#[test]
fn test_status_dangling_attachment() {
    let mut gl = MockDriver::desktop();
    let fb = gl.create_framebuffer().unwrap();
    gl.bind_framebuffer(FramebufferTarget::Framebuffer, fb);
    let color = renderbuffer(&mut gl, GL_RGBA8, 16, 16, 0);
    gl.framebuffer_renderbuffer(FramebufferTarget::Framebuffer, GL_COLOR_ATTACHMENT0, color);
    gl.delete_renderbuffer(color);
    assert_eq!(
        gl.check_framebuffer_status(FramebufferTarget::Framebuffer),
        GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT
    );
}

#[test]
fn test_forced_status_overrides_evaluation() {
    let mut gl = MockDriver::desktop();
    gl.force_status(Some(GL_FRAMEBUFFER_UNSUPPORTED));
    assert_eq!(gl.check_framebuffer_status(FramebufferTarget::Draw), GL_FRAMEBUFFER_UNSUPPORTED);
    gl.force_status(None);
    assert_eq!(gl.check_framebuffer_status(FramebufferTarget::Draw), GL_FRAMEBUFFER_COMPLETE);
}

// ============================================================================
// STORAGE AND FAULT INJECTION
// ============================================================================

#[test]
fn test_renderbuffer_storage_limits() {
    let mut gl = MockDriver::desktop();
    gl.set_limits(8, 4, 256, 256);

    renderbuffer(&mut gl, GL_RGBA8, 512, 16, 0);
    assert_eq!(gl.get_error(), GL_INVALID_VALUE);

    renderbuffer(&mut gl, GL_RGBA8, 16, 16, 8);
    assert_eq!(gl.get_error(), GL_INVALID_VALUE);
}

#[test]
fn test_injected_allocation_failure_is_single_shot() {
    let mut gl = MockDriver::desktop();
    gl.fail_next_allocation(GL_OUT_OF_MEMORY);

    let first = renderbuffer(&mut gl, GL_RGBA8, 16, 16, 0);
    assert_eq!(gl.get_error(), GL_OUT_OF_MEMORY);
    assert_eq!(gl.renderbuffer_storage_of(first), None);

    let second = renderbuffer(&mut gl, GL_RGBA8, 16, 16, 0);
    assert_eq!(gl.get_error(), GL_NO_ERROR);
    assert_eq!(gl.renderbuffer_storage_of(second).unwrap().width, 16);
}

#[test]
fn test_texture_storage_and_parameters() {
    let mut gl = MockDriver::desktop();
    let tex = gl.create_texture().unwrap();
    gl.bind_texture(GL_TEXTURE_2D, tex);
    gl.tex_parameter(GL_TEXTURE_2D, GL_TEXTURE_MIN_FILTER, GL_NEAREST as i32);
    gl.tex_image_2d(GL_TEXTURE_2D, 0, GL_RGBA8, 32, 8, GL_RGBA, GL_UNSIGNED_BYTE);

    let storage = gl.texture_storage_of(tex).unwrap();
    assert_eq!((storage.width, storage.height, storage.samples), (32, 8, 0));
    assert_eq!(gl.texture_parameter(tex, GL_TEXTURE_MIN_FILTER), Some(GL_NEAREST as i32));

    gl.delete_texture(tex);
    assert_eq!(gl.texture_binding(), 0);
    assert_eq!(gl.live_textures(), 0);
}

// ============================================================================
// CALL LOG
// ============================================================================

#[test]
fn test_blit_is_recorded_with_bindings() {
    let mut gl = MockDriver::desktop();
    let src = gl.create_framebuffer().unwrap();
    let dst = gl.create_framebuffer().unwrap();
    gl.bind_framebuffer(FramebufferTarget::Read, src);
    gl.bind_framebuffer(FramebufferTarget::Draw, dst);
    gl.clear_calls();

    gl.blit_framebuffer(BlitRect::sized(8, 8), BlitRect::sized(8, 8), BufferMask::COLOR, GL_NEAREST);

    // Both framebuffers are empty, so the blit itself is rejected
    assert_eq!(gl.get_error(), GL_INVALID_FRAMEBUFFER_OPERATION);
    assert_eq!(
        gl.calls(),
        &[MockCall::Blit {
            read: src,
            draw: dst,
            src: BlitRect::sized(8, 8),
            dst: BlitRect::sized(8, 8),
            mask: BufferMask::COLOR,
            filter: GL_NEAREST,
        }]
    );
}
