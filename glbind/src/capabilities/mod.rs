/// Capabilities module - GL version/profile resolution and per-device caching

pub mod gl_version;
pub mod profile;
pub mod fbo_capabilities;
pub mod device_capabilities;
pub mod capability_registry;

pub use gl_version::*;
pub use profile::*;
pub use fbo_capabilities::*;
pub use device_capabilities::*;
pub use capability_registry::*;
