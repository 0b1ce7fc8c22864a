//! Channel Registry - the channels of one device minor

use alloc::collections::btree_map::{BTreeMap, Entry};

use crate::error::{Result, SlotError};
use crate::slot::channel::{Channel, ChannelId};

/// All channels of one device instance, keyed by id.
///
/// Holds at most one [`Channel`] per id. Channels are only dropped together,
/// by [`ChannelRegistry::release`].
#[derive(Debug)]
pub struct ChannelRegistry {
    channels: BTreeMap<ChannelId, Channel>,
    max_channels: usize,
}

impl ChannelRegistry {
    pub fn new(max_channels: usize) -> Self {
        Self {
            channels: BTreeMap::new(),
            max_channels,
        }
    }

    /// Return the channel for `id`, creating an empty one if needed.
    ///
    /// Fails with [`SlotError::NoMemory`] when an opt-in quota is used up;
    /// the registry is unchanged in that case.
    pub fn find_or_create(&mut self, id: ChannelId) -> Result<&mut Channel> {
        let full = self.channels.len() >= self.max_channels;

        match self.channels.entry(id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                if full {
                    log::warn!(
                        "channel {} not created: {} channel quota reached",
                        id,
                        self.max_channels
                    );
                    return Err(SlotError::NoMemory);
                }
                log::debug!("created channel {}", id);
                Ok(entry.insert(Channel::new(id)))
            }
        }
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Drop every channel, returning how many were released
    pub fn release(&mut self) -> usize {
        let mut released = 0;
        while let Some((id, channel)) = self.channels.pop_first() {
            log::debug!("releasing channel {} ({} bytes)", id, channel.len());
            drop(channel);
            released += 1;
        }
        released
    }
}
