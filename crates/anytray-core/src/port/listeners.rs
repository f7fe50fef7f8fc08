use crate::{CoreError, CoreResult, port::PortRange};

use std::{collections::BTreeSet, panic::Location};

use error_location::ErrorLocation;
use netstat2::{AddressFamilyFlags, ProtocolFlags, ProtocolSocketInfo, get_sockets_info};
use tracing::{debug, instrument};

/// Source of the ports currently held by active UDP listeners.
///
/// Implementations only read the table and never bind a socket.
pub trait ActiveListeners {
    /// Ports inside `range` that already have a UDP listener.
    fn udp_ports_in(&self, range: PortRange) -> CoreResult<BTreeSet<u16>>;
}

/// A fixed listener table, mostly useful in tests.
impl ActiveListeners for BTreeSet<u16> {
    fn udp_ports_in(&self, range: PortRange) -> CoreResult<BTreeSet<u16>> {
        Ok(self
            .iter()
            .copied()
            .filter(|port| range.contains(*port))
            .collect())
    }
}

/// Listener table backed by the operating system.
///
/// Reads the kernel's UDP socket table (sock_diag on Linux, libproc on
/// macOS, `GetExtendedUdpTable` on Windows). Nothing is bound while querying.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemListeners;

impl ActiveListeners for SystemListeners {
    #[track_caller]
    #[instrument(skip(self))]
    fn udp_ports_in(&self, range: PortRange) -> CoreResult<BTreeSet<u16>> {
        let sockets = get_sockets_info(
            AddressFamilyFlags::IPV4 | AddressFamilyFlags::IPV6,
            ProtocolFlags::UDP,
        )
        .map_err(|e| CoreError::PortQueryFailed {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let in_use = ports_in_range(
            sockets.iter().map(|socket| &socket.protocol_socket_info),
            range,
        );

        debug!(
            sockets = sockets.len(),
            in_use = in_use.len(),
            "Active UDP listeners in range"
        );

        Ok(in_use)
    }
}

/// Local UDP ports of `sockets` that fall inside `range`.
pub(crate) fn ports_in_range<'a>(
    sockets: impl IntoIterator<Item = &'a ProtocolSocketInfo>,
    range: PortRange,
) -> BTreeSet<u16> {
    sockets
        .into_iter()
        .filter_map(|info| match info {
            ProtocolSocketInfo::Udp(udp) => Some(udp.local_port),
            ProtocolSocketInfo::Tcp(_) => None,
        })
        .filter(|port| range.contains(*port))
        .collect()
}
