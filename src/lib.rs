//! message_slot - a minor-number scoped message relay
//!
//! A character device driver that lets unrelated processes exchange short
//! messages through numbered channels. Each device minor owns its own set of
//! channels; each channel keeps only the last message written to it.
//!
//! ```
//! use std::sync::Arc;
//! use message_slot::{CharDevTable, MessageSlot, OpenFile, SlotConfig, MSG_SLOT_CHANNEL};
//!
//! let chrdevs = Arc::new(CharDevTable::new());
//! let slot = MessageSlot::init(SlotConfig::default(), &chrdevs).unwrap();
//!
//! let mut file = OpenFile::open(&slot, 0).unwrap();
//! file.ioctl(MSG_SLOT_CHANNEL, 42).unwrap();
//! assert_eq!(file.write(b"abc"), Ok(3));
//!
//! let mut buf = [0u8; 10];
//! assert_eq!(file.read(&mut buf), Ok(3));
//! assert_eq!(&buf[..3], b"abc");
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod device;
pub mod error;
pub mod kern;
pub mod libc;
pub mod slot;

pub use config::{SlotConfig, BUFFER_LEN, DEVICE_RANGE_NAME, MAJOR_NUM, MSG_SLOT_CHANNEL};
pub use device::{CharDevTable, FileOperations, OpenFile, Registration};
pub use error::{Result, SlotError};
pub use kern::copyio::{CopyError, UserSliceReader, UserSliceWriter};
pub use slot::{ChannelId, MessageSlot, SlotFile, TeardownReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Driver name
pub const NAME: &str = DEVICE_RANGE_NAME;
