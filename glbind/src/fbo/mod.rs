/// FBO module - portable framebuffer objects with MSAA resolve

pub mod attachment;
pub mod render_attachment;
pub mod texture_attachment;
pub mod formats;
pub mod status;
pub mod fbo;
pub mod status_batch;
mod fbo_attach;
mod resolve_sink;

pub use attachment::*;
pub use render_attachment::*;
pub use texture_attachment::*;
pub use status::*;
pub use fbo::{DepthStencil, Fbo};
pub use status_batch::*;
