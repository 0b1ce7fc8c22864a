//! Driver configuration
//!
//! Compile-time defaults match the device node conventions of the original
//! message slot module; a [`SlotConfig`] lets a driver instance override them.

use crate::kern::ioctl::iow;

/// Maximum message length in bytes
pub const BUFFER_LEN: usize = 128;

/// Character device major number
pub const MAJOR_NUM: u32 = 235;

/// Name the character device registers under
pub const DEVICE_RANGE_NAME: &str = "message_slot";

/// Number of minors in the device instance table (0..=256)
pub const MINOR_COUNT: usize = 257;

/// Default per-device channel quota (unbounded)
pub const MAX_CHANNELS: usize = usize::MAX;

/// The only control command: select the channel for this handle
pub const MSG_SLOT_CHANNEL: u32 = iow::<u32>(MAJOR_NUM, 0);

/// Tunables of one driver instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    /// Major number to register
    pub major: u32,
    /// Registration name
    pub name: &'static str,
    /// Size of the device instance table
    pub minor_count: usize,
    /// Channels one device may hold before creation fails
    pub max_channels: usize,
}

impl SlotConfig {
    /// Defaults from the constants above
    pub const fn new() -> Self {
        Self {
            major: MAJOR_NUM,
            name: DEVICE_RANGE_NAME,
            minor_count: MINOR_COUNT,
            max_channels: MAX_CHANNELS,
        }
    }

    /// Set major number
    pub fn with_major(mut self, major: u32) -> Self {
        self.major = major;
        self
    }

    /// Set device table size
    pub fn with_minor_count(mut self, n: usize) -> Self {
        self.minor_count = n;
        self
    }

    /// Set per-device channel quota
    pub fn with_max_channels(mut self, n: usize) -> Self {
        self.max_channels = n;
        self
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::new()
    }
}
