/*!
# glbind - glow driver

`GlDriver` implementation for glbind on top of the glow OpenGL bindings.

The application creates the GL context (glutin, SDL, a browser canvas, ...)
and wraps the resulting `glow::Context`:

```no_run
use std::sync::Arc;
use glbind::glbind::{CapabilityRegistry, Fbo};
use glbind_driver_glow::GlowDriver;

# fn run(context: glow::Context) -> glbind::glbind::Result<()> {
let mut gl = GlowDriver::new(Arc::new(context));
let mut registry = CapabilityRegistry::new();
registry.probe(&mut gl, ":0")?;

let caps = registry.fbo_capabilities(":0").unwrap_or_default();
let mut fbo = Fbo::new(caps);
fbo.init(&mut gl, 1280, 720, 4)?;
fbo.attach_colorbuffer(&mut gl, 0, true)?;
# Ok(())
# }
```
*/

mod glow_driver;

pub use glow_driver::GlowDriver;

// Namespace module mirroring the core crate
pub mod glbind {
    pub use crate::glow_driver::GlowDriver;
}
