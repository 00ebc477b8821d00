/// Driver module - the GL boundary every GPU-side effect goes through

pub mod gl_constants;
pub mod gl_driver;

pub use gl_driver::*;

// Mock GL driver for tests (no GPU required)
pub mod mock_driver;
