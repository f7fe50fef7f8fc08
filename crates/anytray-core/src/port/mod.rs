mod allocator;
mod listeners;
mod range;

pub use {
    allocator::{PortAllocator, first_free},
    listeners::{ActiveListeners, SystemListeners},
    range::{DEFAULT_RANGE_SIZE, DEFAULT_RANGE_START, PortRange},
};

#[cfg(test)]
pub(crate) use listeners::ports_in_range;
