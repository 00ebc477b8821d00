/// GL capability profiles
///
/// A profile names a family of GL entry points an application can target.
/// `bc` ("backward compatible") profiles include the fixed-function pipeline and
/// need a compatibility context; the others work on core contexts too.

use std::fmt;
use super::gl_version::{GlApi, GlVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlProfile {
    GL4bc,
    GL4,
    GL3bc,
    GL3,
    GL2,
    GLES3,
    GLES2,
    GLES1,
}

impl GlProfile {
    /// Every profile, most capable first within each API family
    pub const ALL: [GlProfile; 8] = [
        GlProfile::GL4bc,
        GlProfile::GL4,
        GlProfile::GL3bc,
        GlProfile::GL3,
        GlProfile::GL2,
        GlProfile::GLES3,
        GlProfile::GLES2,
        GlProfile::GLES1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GlProfile::GL4bc => "GL4bc",
            GlProfile::GL4 => "GL4",
            GlProfile::GL3bc => "GL3bc",
            GlProfile::GL3 => "GL3",
            GlProfile::GL2 => "GL2",
            GlProfile::GLES3 => "GLES3",
            GlProfile::GLES2 => "GLES2",
            GlProfile::GLES1 => "GLES1",
        }
    }

    /// Parse a profile name as returned by `name()`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn api(self) -> GlApi {
        match self {
            GlProfile::GLES3 | GlProfile::GLES2 | GlProfile::GLES1 => GlApi::Es,
            _ => GlApi::Desktop,
        }
    }

    /// Minimum context version (major, minor) implementing the profile
    pub fn required_version(self) -> (u32, u32) {
        match self {
            GlProfile::GL4bc | GlProfile::GL4 => (4, 0),
            GlProfile::GL3bc | GlProfile::GL3 => (3, 1),
            GlProfile::GL2 => (1, 5),
            GlProfile::GLES3 => (3, 0),
            GlProfile::GLES2 => (2, 0),
            GlProfile::GLES1 => (1, 0),
        }
    }

    /// True for the fixed-function ("backward compatible") profiles
    pub fn is_compatibility(self) -> bool {
        matches!(self, GlProfile::GL4bc | GlProfile::GL3bc | GlProfile::GL2 | GlProfile::GLES1)
    }

    /// Rank inside `ALL` (lower is preferred)
    pub(crate) fn rank(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(Self::ALL.len())
    }

    /// Whether a context of `version` can provide this profile natively
    ///
    /// `compatibility` tells whether the desktop context exposes the
    /// fixed-function pipeline. ES1 is fixed-function only, so ES 2.0+
    /// contexts never provide it.
    pub fn is_native_to(self, version: &GlVersion, compatibility: bool) -> bool {
        if self.api() != version.api {
            return false;
        }
        let (major, minor) = self.required_version();
        if !version.at_least(major, minor) {
            return false;
        }
        match self {
            GlProfile::GLES1 => !version.at_least(2, 0),
            GlProfile::GLES2 | GlProfile::GLES3 => true,
            _ => !self.is_compatibility() || compatibility,
        }
    }
}

impl fmt::Display for GlProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
