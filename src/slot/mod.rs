//! Message Slot Core
//!
//! Leaves first:
//! - [`channel`]: one single-message mailbox
//! - [`registry`]: the channels of one device minor
//! - [`table`]: minor number → registry
//! - [`file`]: the channel binding of one open handle
//! - [`driver`]: open/ioctl/read/write and the driver lifecycle

pub mod channel;
pub mod driver;
pub mod file;
pub mod registry;
pub mod table;

pub use channel::{Channel, ChannelId};
pub use driver::MessageSlot;
pub use file::SlotFile;
pub use registry::ChannelRegistry;
pub use table::{DeviceTable, SharedRegistry, TeardownReport};
