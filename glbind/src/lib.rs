/*!
# glbind

OpenGL capability resolution and portable framebuffer objects.

The crate probes what a GL context can do (version, profile, extensions,
limits, driver quirks) and manages offscreen framebuffers on top of it,
including multisampled framebuffers that resolve into a single-sampled
texture. Every GL call goes through the `GlDriver` trait; backends such as
`glbind_driver_glow` implement it for a real context.

## Architecture

- **CapabilityRegistry**: per-device cache of probed `DeviceCapabilities`
- **GlProfile**: profile names and version-to-profile mapping
- **Fbo**: framebuffer object owning its color, depth and stencil attachments
- **StatusBatch**: deferred completeness checking for multi-step setups
- **GlDriver**: the GL boundary (mocked by `MockDriver` in tests)
*/

// Internal modules
mod error;
mod facade;
pub mod log;
pub mod driver;
pub mod capabilities;
pub mod fbo;

// Main glbind namespace module
pub mod glbind {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging façade
    pub use crate::facade::Glbind;

    // Most used entry points
    pub use crate::capabilities::CapabilityRegistry;
    pub use crate::driver::GlDriver;
    pub use crate::fbo::Fbo;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // GL boundary sub-module
    pub mod driver {
        pub use crate::driver::*;
    }

    // Capability sub-module
    pub mod capabilities {
        pub use crate::capabilities::*;
    }

    // Framebuffer sub-module
    pub mod fbo {
        pub use crate::fbo::*;
    }
}
