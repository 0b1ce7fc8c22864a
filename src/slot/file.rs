//! File Handle State - the channel binding of one open handle

use crate::error::{Result, SlotError};
use crate::slot::channel::ChannelId;

/// Per-handle state returned by open.
///
/// Starts unbound; the select-channel control call binds it, and a later
/// call rebinds it. Nothing here outlives the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFile {
    minor: u32,
    channel: Option<ChannelId>,
}

impl SlotFile {
    pub(crate) fn new(minor: u32) -> Self {
        Self {
            minor,
            channel: None,
        }
    }

    /// Minor number this handle was opened on
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Currently selected channel, if any
    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    pub(crate) fn bind(&mut self, id: ChannelId) {
        self.channel = Some(id);
    }

    /// Selected channel, or [`SlotError::Unbound`]
    pub fn bound(&self) -> Result<ChannelId> {
        self.channel.ok_or(SlotError::Unbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebind() {
        let mut file = SlotFile::new(3);
        assert_eq!(file.bound(), Err(SlotError::Unbound));

        file.bind(ChannelId::new(5).unwrap());
        file.bind(ChannelId::new(7).unwrap());
        assert_eq!(file.channel().map(ChannelId::get), Some(7));
        assert_eq!(file.minor(), 3);
    }
}
