//! Sender side of the message slot device
//!
//! Opens a device node, selects a channel and writes exactly one message.
//! The device is reached through [`SlotDevice`], so the same send routine
//! drives a real device node or an in-process [`message_slot::MessageSlot`].

pub mod node;

use std::io;
use std::path::PathBuf;

use message_slot::{MessageSlot, OpenFile, MSG_SLOT_CHANNEL};
use thiserror::Error;

pub use node::DeviceNode;

/// Errors reported by the sender
#[derive(Error, Debug)]
pub enum SendError {
    #[error("failed opening {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid channel id {0:?}")]
    InvalidChannel(String),

    #[error("ioctl: {0}")]
    Ioctl(#[source] io::Error),

    #[error("writing to device: {0}")]
    Write(#[source] io::Error),

    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// A message slot device as seen from user space
pub trait SlotDevice {
    /// Issue the select-channel control call
    fn select_channel(&mut self, id: u64) -> io::Result<()>;

    /// One write call; returns the byte count the device reported
    fn write_message(&mut self, msg: &[u8]) -> io::Result<usize>;
}

impl SlotDevice for OpenFile<'_, MessageSlot> {
    fn select_channel(&mut self, id: u64) -> io::Result<()> {
        Ok(self.ioctl(MSG_SLOT_CHANNEL, id)?)
    }

    fn write_message(&mut self, msg: &[u8]) -> io::Result<usize> {
        Ok(self.write(msg)?)
    }
}

/// Parse a channel id argument; zero is not a valid channel
pub fn parse_channel_id(arg: &str) -> Result<u64, SendError> {
    match arg.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(SendError::InvalidChannel(arg.to_string())),
    }
}

/// Select `id` on `dev` and write `msg` once
///
/// Succeeds only if the device accepted the whole message.
pub fn send<D: SlotDevice>(dev: &mut D, id: u64, msg: &[u8]) -> Result<usize, SendError> {
    dev.select_channel(id).map_err(SendError::Ioctl)?;
    log::debug!("selected channel {}", id);

    let written = dev.write_message(msg).map_err(SendError::Write)?;
    if written != msg.len() {
        return Err(SendError::ShortWrite {
            written,
            expected: msg.len(),
        });
    }

    log::debug!("wrote {} bytes to channel {}", written, id);
    Ok(written)
}
