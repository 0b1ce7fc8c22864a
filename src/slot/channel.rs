//! Channel - a single-slot mailbox

use core::fmt;

use heapless::Vec as HeaplessVec;

use crate::config::BUFFER_LEN;
use crate::error::{Result, SlotError};

/// Channel identifier (never zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Returns `None` for the reserved id 0
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A channel holds at most one message: the last one written to it.
#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    message: HeaplessVec<u8, BUFFER_LEN>,
}

impl Channel {
    /// Create an empty channel
    pub fn new(id: ChannelId) -> Self {
        Self {
            id,
            message: HeaplessVec::new(),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Length of the stored message, 0 if nothing was written
    pub fn len(&self) -> usize {
        self.message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    /// Current message bytes
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Replace the stored message.
    ///
    /// The length is checked before anything changes, so a rejected message
    /// leaves the previous one in place.
    pub fn store(&mut self, msg: &[u8]) -> Result<usize> {
        if msg.is_empty() || msg.len() > BUFFER_LEN {
            return Err(SlotError::MessageSize(msg.len()));
        }

        self.message.clear();
        self.message
            .extend_from_slice(msg)
            .map_err(|_| SlotError::MessageSize(msg.len()))?;
        Ok(self.message.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ChannelId {
        ChannelId::new(raw).unwrap()
    }

    #[test]
    fn test_channel_id_zero_reserved() {
        assert!(ChannelId::new(0).is_none());
        assert_eq!(id(42).get(), 42);
    }

    #[test]
    fn test_new_channel_is_empty() {
        let ch = Channel::new(id(1));
        assert!(ch.is_empty());
        assert_eq!(ch.message(), b"");
    }

    #[test]
    fn test_store_overwrites() {
        let mut ch = Channel::new(id(1));
        assert_eq!(ch.store(b"xyz"), Ok(3));
        assert_eq!(ch.store(b"ab"), Ok(2));
        assert_eq!(ch.message(), b"ab");
    }

    #[test]
    fn test_store_rejects_bad_sizes() {
        let mut ch = Channel::new(id(1));
        ch.store(b"keep").unwrap();

        assert_eq!(ch.store(b""), Err(SlotError::MessageSize(0)));
        let big = [7u8; BUFFER_LEN + 1];
        assert_eq!(ch.store(&big), Err(SlotError::MessageSize(BUFFER_LEN + 1)));
        assert_eq!(ch.message(), b"keep");

        let full = [7u8; BUFFER_LEN];
        assert_eq!(ch.store(&full), Ok(BUFFER_LEN));
    }
}
