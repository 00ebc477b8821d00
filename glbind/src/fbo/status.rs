/// Framebuffer completeness status

use std::fmt;
use crate::driver::gl_constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FboStatus {
    /// No native framebuffer exists (not initialized or destroyed)
    NotAFbo,
    /// The driver returned 0 (the status query itself failed)
    Zero,
    Complete,
    IncompleteAttachment,
    IncompleteMissingAttachment,
    IncompleteDimensions,
    IncompleteFormats,
    IncompleteDrawBuffer,
    IncompleteReadBuffer,
    IncompleteMultisample,
    IncompleteLayerTargets,
    Unsupported,
    Undefined,
    /// Code not listed above
    Unknown(u32),
}

impl FboStatus {
    /// Map a glCheckFramebufferStatus result
    pub fn from_gl(code: u32) -> Self {
        match code {
            0 => FboStatus::Zero,
            GL_FRAMEBUFFER_COMPLETE => FboStatus::Complete,
            GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FboStatus::IncompleteAttachment,
            GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FboStatus::IncompleteMissingAttachment,
            GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS => FboStatus::IncompleteDimensions,
            GL_FRAMEBUFFER_INCOMPLETE_FORMATS => FboStatus::IncompleteFormats,
            GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FboStatus::IncompleteDrawBuffer,
            GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FboStatus::IncompleteReadBuffer,
            GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => FboStatus::IncompleteMultisample,
            GL_FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => FboStatus::IncompleteLayerTargets,
            GL_FRAMEBUFFER_UNSUPPORTED => FboStatus::Unsupported,
            GL_FRAMEBUFFER_UNDEFINED => FboStatus::Undefined,
            other => FboStatus::Unknown(other),
        }
    }

    /// Status code, -1 for `NotAFbo`
    pub fn code(self) -> i64 {
        match self {
            FboStatus::NotAFbo => -1,
            FboStatus::Zero => 0,
            FboStatus::Complete => GL_FRAMEBUFFER_COMPLETE as i64,
            FboStatus::IncompleteAttachment => GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT as i64,
            FboStatus::IncompleteMissingAttachment => GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT as i64,
            FboStatus::IncompleteDimensions => GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS as i64,
            FboStatus::IncompleteFormats => GL_FRAMEBUFFER_INCOMPLETE_FORMATS as i64,
            FboStatus::IncompleteDrawBuffer => GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER as i64,
            FboStatus::IncompleteReadBuffer => GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER as i64,
            FboStatus::IncompleteMultisample => GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE as i64,
            FboStatus::IncompleteLayerTargets => GL_FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS as i64,
            FboStatus::Unsupported => GL_FRAMEBUFFER_UNSUPPORTED as i64,
            FboStatus::Undefined => GL_FRAMEBUFFER_UNDEFINED as i64,
            FboStatus::Unknown(code) => code as i64,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FboStatus::NotAFbo => "not a framebuffer",
            FboStatus::Zero => "status query failed",
            FboStatus::Complete => "complete",
            FboStatus::IncompleteAttachment => "incomplete attachment",
            FboStatus::IncompleteMissingAttachment => "incomplete, missing attachment",
            FboStatus::IncompleteDimensions => "incomplete, attachments differ in size",
            FboStatus::IncompleteFormats => "incomplete, attachments differ in format",
            FboStatus::IncompleteDrawBuffer => "incomplete draw buffer",
            FboStatus::IncompleteReadBuffer => "incomplete read buffer",
            FboStatus::IncompleteMultisample => "incomplete, attachments differ in sample count",
            FboStatus::IncompleteLayerTargets => "incomplete layer targets",
            FboStatus::Unsupported => "unsupported format combination",
            FboStatus::Undefined => "undefined (default framebuffer missing)",
            FboStatus::Unknown(_) => "unknown status",
        }
    }

    pub fn is_complete(self) -> bool {
        self == FboStatus::Complete
    }

    /// Any `Incomplete*` status
    pub fn is_incomplete(self) -> bool {
        matches!(
            self,
            FboStatus::IncompleteAttachment
                | FboStatus::IncompleteMissingAttachment
                | FboStatus::IncompleteDimensions
                | FboStatus::IncompleteFormats
                | FboStatus::IncompleteDrawBuffer
                | FboStatus::IncompleteReadBuffer
                | FboStatus::IncompleteMultisample
                | FboStatus::IncompleteLayerTargets
        )
    }

    /// Whether the status is acceptable for an FBO with this configuration
    ///
    /// Incomplete states are tolerated while an FBO is still being assembled,
    /// i.e. as long as it does not yet hold both color and depth attachments.
    pub fn is_valid_for(self, color_count: usize, has_depth: bool) -> bool {
        if self.is_complete() {
            return true;
        }
        self.is_incomplete() && (color_count == 0 || !has_depth)
    }
}

impl fmt::Display for FboStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FboStatus::NotAFbo => write!(f, "FBO {}", self.description()),
            _ => write!(f, "FBO {} (0x{:04X})", self.description(), self.code()),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
