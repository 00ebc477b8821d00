//! Error types for glbind
//!
//! This module defines the error types used throughout the crate, covering
//! configuration mistakes, GPU allocation failures, framebuffer completeness
//! failures and internal consistency violations.

use std::fmt;
use crate::fbo::FboStatus;

/// Result type for glbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// glbind errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Bad argument (slot index, attachment kind, format)
    InvalidArgument(String),

    /// Operation not allowed in the current lifecycle state
    InvalidState(String),

    /// Unsupported combination (texture color target with MSAA, depth textures, ...)
    Unsupported(String),

    /// Attachment point already occupied
    AlreadyAttached(String),

    /// The driver reported an error while allocating a GPU object
    Allocation {
        /// GL error code
        code: u32,
        /// Description of the attachment being allocated
        description: String,
    },

    /// The driver reported an error outside of an allocation
    Driver {
        /// GL error code
        code: u32,
        /// Operation during which the error was observed
        operation: String,
    },

    /// Requested framebuffer size is above the device limits
    SizeExceeded {
        width: u32,
        height: u32,
        max_texture_size: u32,
        max_renderbuffer_size: u32,
    },

    /// Framebuffer completeness check failed
    Status {
        /// Status reported by the driver
        status: FboStatus,
        /// Context of the failed operation
        message: String,
    },

    /// Internal consistency violation (logic defect, not recoverable in place)
    Internal(String),

    /// Initialization failed (no FBO support, capability probe failure)
    InitializationFailed(String),

    /// Backend-specific error (object creation in the GL binding)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            Error::AlreadyAttached(msg) => write!(f, "Already attached: {}", msg),
            Error::Allocation { code, description } => {
                write!(f, "GL error 0x{:X} while allocating {}", code, description)
            }
            Error::Driver { code, operation } => {
                write!(f, "GL error 0x{:X} during {}", code, operation)
            }
            Error::SizeExceeded { width, height, max_texture_size, max_renderbuffer_size } => write!(
                f,
                "Size {}x{} exceeds limits (max texture {}, max renderbuffer {})",
                width, height, max_texture_size, max_renderbuffer_size
            ),
            Error::Status { status, message } => {
                write!(f, "Framebuffer status {}: {}", status.description(), message)
            }
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build a string-carrying error variant and log it at ERROR level
///
/// # Example
///
/// ```ignore
/// let err = glbind_err!("glbind::Fbo", InvalidArgument, "slot {} out of range", slot);
/// ```
#[macro_export]
macro_rules! glbind_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::glbind_error!($source, "{}", message);
        $crate::glbind::Error::$variant(message)
    }};
}

/// Return early with a logged string-carrying error variant
#[macro_export]
macro_rules! glbind_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::glbind_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
