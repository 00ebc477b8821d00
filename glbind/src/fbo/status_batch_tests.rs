/// Tests for StatusBatch

use super::*;
use crate::capabilities::{DeviceCapabilities, FboCapabilities};
use crate::driver::gl_constants::*;
use crate::driver::mock_driver::MockDriver;
use crate::error::Error;
use crate::fbo::status::FboStatus;

fn desktop() -> (MockDriver, FboCapabilities) {
    let mut gl = MockDriver::desktop();
    let caps = DeviceCapabilities::probe(&mut gl, ":0").unwrap().fbo_capabilities();
    (gl, caps)
}

fn initialized(gl: &mut MockDriver, caps: FboCapabilities) -> Fbo {
    let mut fbo = Fbo::new(caps);
    fbo.init(gl, 32, 32, 0).unwrap();
    fbo
}

// ============================================================================
// Tests: Deferred checking
// ============================================================================

#[test]
fn test_batch_defers_status_until_finish() {
    let (mut gl, caps) = desktop();
    let mut fbo = initialized(&mut gl, caps);
    // would be rejected by an immediate check once color and depth are both present
    gl.force_status(Some(GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS));

    let mut batch = fbo.batch();
    batch.attach_colorbuffer(&mut gl, 0, true).unwrap();
    batch.attach_renderbuffer(&mut gl, AttachmentKind::Depth, 24).unwrap();
    assert_eq!(batch.fbo().color_attachment_count(), 1);
    assert!(batch.fbo().has_depth());

    gl.force_status(None);
    batch.finish(&mut gl).unwrap();
    assert_eq!(fbo.status(), FboStatus::Complete);
}

#[test]
fn test_finish_failure_disposes_everything() {
    let (mut gl, caps) = desktop();
    let mut fbo = initialized(&mut gl, caps);

    let mut batch = fbo.batch();
    batch.attach_colorbuffer(&mut gl, 0, true).unwrap();
    batch.attach_texture2d(&mut gl, 1, true).unwrap();
    batch.attach_renderbuffer_format(&mut gl, GL_DEPTH_COMPONENT16).unwrap();
    gl.force_status(Some(GL_FRAMEBUFFER_UNSUPPORTED));

    let result = batch.finish(&mut gl);
    assert!(matches!(result, Err(Error::Status { status: FboStatus::Unsupported, .. })));
    assert_eq!(fbo.color_attachment_count(), 0);
    assert!(!fbo.has_depth());
    assert_eq!(gl.live_renderbuffers() + gl.live_textures(), 0);
}

#[test]
fn test_batch_argument_errors_are_immediate() {
    let (mut gl, caps) = desktop();
    let mut fbo = initialized(&mut gl, caps);

    let mut batch = fbo.batch();
    batch.attach_colorbuffer(&mut gl, 0, true).unwrap();
    assert!(matches!(batch.attach_colorbuffer(&mut gl, 0, true), Err(Error::InvalidArgument(_))));
    assert!(matches!(batch.dispose_colorbuffer(&mut gl, 99), Err(Error::InvalidArgument(_))));
    batch.finish(&mut gl).unwrap();
    assert_eq!(fbo.color_attachment_count(), 1);
}

#[test]
fn test_batch_dispose_and_recreate() {
    let (mut gl, caps) = desktop();
    let mut fbo = initialized(&mut gl, caps);
    let key = fbo.attach_texture2d(&mut gl, 0, true).unwrap();

    let mut batch = fbo.batch();
    assert_eq!(batch.recreate_colorbuffer(&mut gl, 0).unwrap(), Some(key));
    assert!(batch.dispose_colorbuffer(&mut gl, 0).unwrap());
    assert!(!batch.dispose_colorbuffer(&mut gl, 0).unwrap());
    batch.finish(&mut gl).unwrap();

    assert_eq!(fbo.color_attachment_count(), 0);
    assert_eq!(gl.live_textures(), 0);
}

#[test]
fn test_explicit_attachment_in_batch() {
    let (mut gl, caps) = desktop();
    let mut fbo = initialized(&mut gl, caps);
    let texture = crate::fbo::formats::color_texture(false, &caps, 32, 32);

    let mut batch = fbo.batch();
    let key = batch.attach_colorbuffer_with(&mut gl, 2, texture).unwrap();
    batch.finish(&mut gl).unwrap();
    assert_eq!(fbo.colorbuffer_key(2), Some(key));
}

#[test]
fn test_finish_on_uninitialized_is_ok() {
    let (mut gl, caps) = desktop();
    let mut fbo = Fbo::new(caps);
    fbo.batch().finish(&mut gl).unwrap();
    assert!(!fbo.is_initialized());
}
