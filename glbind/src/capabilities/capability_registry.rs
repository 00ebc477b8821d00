/// Application-owned cache of per-device capabilities
///
/// Devices are keyed by their connection string (display name, adapter id...).
/// Probing is done once per device; later lookups never touch the driver.

use rustc_hash::FxHashMap;
use crate::driver::GlDriver;
use crate::error::Result;
use crate::glbind_debug;
use super::device_capabilities::DeviceCapabilities;
use super::fbo_capabilities::FboCapabilities;
use super::profile::GlProfile;

#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    devices: FxHashMap<String, DeviceCapabilities>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `connection` through `gl` unless it is already cached
    ///
    /// `gl` must be a context current on that device. A failed probe leaves
    /// the registry unchanged.
    pub fn probe(&mut self, gl: &mut dyn GlDriver, connection: &str) -> Result<&DeviceCapabilities> {
        if !self.devices.contains_key(connection) {
            let caps = DeviceCapabilities::probe(gl, connection)?;
            self.devices.insert(connection.to_string(), caps);
        } else {
            glbind_debug!("glbind::CapabilityRegistry", "device '{}' already probed", connection);
        }
        self.devices.get(connection).ok_or_else(|| {
            crate::glbind_err!("glbind::CapabilityRegistry", Internal,
                "device '{}' missing right after probe", connection)
        })
    }

    /// Insert or replace a capability record built elsewhere
    pub fn insert(&mut self, caps: DeviceCapabilities) {
        self.devices.insert(caps.connection.clone(), caps);
    }

    pub fn get(&self, connection: &str) -> Option<&DeviceCapabilities> {
        self.devices.get(connection)
    }

    pub fn contains(&self, connection: &str) -> bool {
        self.devices.contains_key(connection)
    }

    /// Drop a device (it will be probed again next time)
    pub fn forget(&mut self, connection: &str) -> Option<DeviceCapabilities> {
        let removed = self.devices.remove(connection);
        if removed.is_some() {
            glbind_debug!("glbind::CapabilityRegistry", "forgot device '{}'", connection);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Profile implementing `requested` on `connection`
    ///
    /// Returns `requested` when available, otherwise the best available
    /// profile of the same API ranked below it, otherwise `None`. Unknown
    /// devices map to `None`.
    pub fn map_profile(&self, connection: &str, requested: GlProfile) -> Option<GlProfile> {
        let caps = self.devices.get(connection)?;
        if caps.is_profile_available(requested) {
            return Some(requested);
        }
        let mapped = caps
            .profiles
            .iter()
            .copied()
            .find(|p| p.api() == requested.api() && p.rank() > requested.rank());
        if let Some(mapped) = mapped {
            glbind_debug!("glbind::CapabilityRegistry",
                "'{}': {} unavailable, mapped to {}", connection, requested, mapped);
        }
        mapped
    }

    /// Most capable profile available on `connection`
    pub fn default_profile(&self, connection: &str) -> Option<GlProfile> {
        self.devices.get(connection)?.profiles.first().copied()
    }

    pub fn fbo_capabilities(&self, connection: &str) -> Option<FboCapabilities> {
        self.devices.get(connection).map(DeviceCapabilities::fbo_capabilities)
    }
}

#[cfg(test)]
#[path = "capability_registry_tests.rs"]
mod tests;
