use crate::config::{default_bind_address, default_range_size, default_range_start};

use std::net::IpAddr;

use anytray_core::PortRange;
use serde::{Deserialize, Serialize};

/// UDP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Local address to bind (`0.0.0.0` accepts commands from the network).
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    /// First port scanned for a free listener slot.
    #[serde(default = "default_range_start")]
    pub range_start: u16,
    /// Number of ports scanned.
    #[serde(default = "default_range_size")]
    pub range_size: u16,
}

impl ListenerConfig {
    /// Candidate ports as a [`PortRange`].
    pub fn range(&self) -> PortRange {
        PortRange::new(self.range_start, self.range_size)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            range_start: default_range_start(),
            range_size: default_range_size(),
        }
    }
}
