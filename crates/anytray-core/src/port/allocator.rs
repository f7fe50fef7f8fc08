use crate::{
    CoreError, CoreResult,
    port::{ActiveListeners, PortRange, SystemListeners},
};

use std::{collections::BTreeSet, panic::Location};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};

/// Smallest port of `range` that is not in `in_use`.
pub fn first_free(range: PortRange, in_use: &BTreeSet<u16>) -> Option<u16> {
    range.iter().find(|port| !in_use.contains(port))
}

/// Picks a free UDP port from a range at start-up.
///
/// Allocation never binds the chosen port. The caller binds it right after,
/// and losing that race to another process shows up as
/// [`CoreError::BindFailed`] at bind time.
#[derive(Debug, Clone)]
pub struct PortAllocator<L = SystemListeners> {
    listeners: L,
}

impl PortAllocator<SystemListeners> {
    /// Allocator that consults the operating system's listener table.
    pub fn system() -> Self {
        Self::new(SystemListeners)
    }
}

impl<L: ActiveListeners> PortAllocator<L> {
    /// Create an allocator over an arbitrary listener table.
    pub fn new(listeners: L) -> Self {
        Self { listeners }
    }

    /// Return the numerically first port in `range` with no active listener.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoPortAvailable`] when every candidate is taken and
    /// [`CoreError::PortQueryFailed`] when the listener table cannot be read.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn allocate(&self, range: PortRange) -> CoreResult<u16> {
        let in_use = self.listeners.udp_ports_in(range)?;

        match first_free(range, &in_use) {
            Some(port) => {
                info!(port, skipped = in_use.len(), "UDP port allocated");
                Ok(port)
            }
            None => {
                warn!(
                    start = range.start(),
                    end = range.end(),
                    "No free UDP port in range"
                );
                Err(CoreError::NoPortAvailable {
                    start: range.start(),
                    end: range.end(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}
