mod datagram_listener;

pub use datagram_listener::{DatagramListener, MAX_DATAGRAM_SIZE};

#[cfg(test)]
pub(crate) use datagram_listener::DatagramSource;
