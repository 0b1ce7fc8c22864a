//! Device Instance Table - minor number → channel registry

use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

use crate::error::{Result, SlotError};
use crate::slot::registry::ChannelRegistry;

/// A registry shared by every handle opened on the same minor.
///
/// The lock serializes channel creation, message overwrite and message
/// read for that device.
pub type SharedRegistry = Arc<Mutex<ChannelRegistry>>;

/// What teardown released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownReport {
    pub registries: usize,
    pub channels: usize,
}

/// Per-minor registries, created lazily on first open
#[derive(Debug)]
pub struct DeviceTable {
    slots: Mutex<Vec<Option<SharedRegistry>>>,
    max_channels: usize,
}

impl DeviceTable {
    /// Create an empty table with `minor_count` entries
    pub fn new(minor_count: usize, max_channels: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(minor_count)
            .map_err(|_| SlotError::NoMemory)?;
        slots.resize_with(minor_count, || None);

        Ok(Self {
            slots: Mutex::new(slots),
            max_channels,
        })
    }

    /// Return the registry for `minor`, creating it on first use
    pub fn instantiate(&self, minor: u32) -> Result<SharedRegistry> {
        let mut slots = self.slots.lock();
        let slot = slots
            .get_mut(minor as usize)
            .ok_or(SlotError::NoDevice(minor))?;

        if let Some(registry) = slot.as_ref() {
            return Ok(Arc::clone(registry));
        }

        let registry = Arc::new(Mutex::new(ChannelRegistry::new(self.max_channels)));
        *slot = Some(Arc::clone(&registry));
        log::debug!("minor {}: channel registry created", minor);
        Ok(registry)
    }

    /// Registry for `minor` if it was ever opened
    pub fn get(&self, minor: u32) -> Option<SharedRegistry> {
        self.slots.lock().get(minor as usize)?.clone()
    }

    /// Release every channel of every registry, then the registries
    pub fn release_all(&self) -> TeardownReport {
        let mut report = TeardownReport::default();
        let mut slots = self.slots.lock();

        for (minor, slot) in slots.iter_mut().enumerate() {
            if let Some(registry) = slot.take() {
                let channels = registry.lock().release();
                log::debug!("minor {}: released {} channels", minor, channels);
                report.channels += channels;
                report.registries += 1;
            }
        }

        report
    }
}
