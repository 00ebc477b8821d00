/// GL_VERSION string parsing
///
/// Desktop drivers report `"<major>.<minor>[.<release>] <vendor info>"`, ES drivers
/// prefix it with `"OpenGL ES "` (or `"OpenGL ES-CM "` / `"OpenGL ES-CL "` for 1.x).

use std::fmt;
use crate::error::Result;
use crate::glbind_err;

/// Client API family of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlApi {
    /// Desktop OpenGL
    Desktop,
    /// OpenGL ES
    Es,
}

/// Parsed context version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlVersion {
    pub api: GlApi,
    pub major: u32,
    pub minor: u32,
}

impl GlVersion {
    pub fn new(api: GlApi, major: u32, minor: u32) -> Self {
        Self { api, major, minor }
    }

    /// Parse a GL_VERSION string
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when no `major.minor` number can be found.
    pub fn parse(version: &str) -> Result<Self> {
        let trimmed = version.trim();
        let (api, rest) = match trimmed.strip_prefix("OpenGL ES") {
            Some(rest) => (GlApi::Es, rest),
            None => (GlApi::Desktop, trimmed.strip_prefix("OpenGL").unwrap_or(trimmed)),
        };

        let number = rest
            .split_whitespace()
            .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(|| {
                glbind_err!("glbind::GlVersion", InvalidArgument, "no version number in '{}'", version)
            })?;

        let mut parts = number.split('.');
        let major = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minor = parts.next().and_then(|p| {
            let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        });

        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Self { api, major, minor }),
            _ => Err(glbind_err!(
                "glbind::GlVersion",
                InvalidArgument,
                "malformed version number '{}' in '{}'",
                number,
                version
            )),
        }
    }

    pub fn is_es(&self) -> bool {
        self.api == GlApi::Es
    }

    pub fn is_desktop(&self) -> bool {
        self.api == GlApi::Desktop
    }

    /// True when this version is `major.minor` or newer (API is not compared)
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.api {
            GlApi::Desktop => write!(f, "{}.{}", self.major, self.minor),
            GlApi::Es => write!(f, "ES {}.{}", self.major, self.minor),
        }
    }
}

#[cfg(test)]
#[path = "gl_version_tests.rs"]
mod tests;
