/// First port scanned when no range is configured.
pub const DEFAULT_RANGE_START: u16 = 1738;

/// Number of ports scanned when no range is configured.
pub const DEFAULT_RANGE_SIZE: u16 = 500;

/// Half-open range of candidate ports, `[start, start + size)`.
///
/// The end is clamped to the port space, and port 0 is never a candidate
/// because binding it asks the OS for an ephemeral port instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    size: u16,
}

impl PortRange {
    /// Create a range of `size` ports beginning at `start`.
    pub const fn new(start: u16, size: u16) -> Self {
        Self { start, size }
    }

    /// First port of the range.
    pub fn start(self) -> u16 {
        self.start
    }

    /// One past the last port of the range.
    pub fn end(self) -> u32 {
        (u32::from(self.start) + u32::from(self.size)).min(u32::from(u16::MAX) + 1)
    }

    /// Whether the range contains no usable port.
    pub fn is_empty(self) -> bool {
        self.iter().next().is_none()
    }

    /// Whether `port` is a candidate of this range.
    pub fn contains(self, port: u16) -> bool {
        port != 0 && u32::from(port) >= u32::from(self.start) && u32::from(port) < self.end()
    }

    /// Candidate ports in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u16> {
        (u32::from(self.start).max(1)..self.end()).filter_map(|port| u16::try_from(port).ok())
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_START, DEFAULT_RANGE_SIZE)
    }
}
