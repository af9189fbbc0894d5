//! Device numbers handed out by the host.

use std::fmt;

/// First major number in the dynamic allocation range.
pub const DYNAMIC_MAJOR_FIRST: u32 = 234;
/// Last major number in the dynamic allocation range. Allocation starts here
/// and walks down.
pub const DYNAMIC_MAJOR_LAST: u32 = 254;

/// Opaque identity of one reserved device region (`major:minor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceNumber {
    pub major: u32,
    pub minor: u32,
}

impl DeviceNumber {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}
