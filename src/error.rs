//! Driver error type
//!
//! Every device operation reports failure through [`SlotError`]. The errno
//! mapping lives in [`crate::libc::errno`].

use thiserror::Error;

use crate::kern::copyio::CopyError;

/// Result alias used by all device operations
pub type Result<T> = core::result::Result<T, SlotError>;

/// Message slot errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// Zero channel id, unknown control command or null buffer
    #[error("invalid argument")]
    InvalidArgument,

    /// Read or write on a handle that never selected a channel
    #[error("no channel selected on this handle")]
    Unbound,

    /// Write length outside `1..=BUFFER_LEN`
    #[error("message size {0} out of range")]
    MessageSize(usize),

    /// The bound channel holds no message
    #[error("no message on channel")]
    WouldBlock,

    /// Destination is smaller than the stored message
    #[error("buffer of {capacity} bytes cannot hold {needed}-byte message")]
    NoSpace { needed: usize, capacity: usize },

    /// Registry or channel could not be allocated
    #[error("out of memory")]
    NoMemory,

    /// Caller buffer could not be fully read
    #[error("copy from caller failed: {0}")]
    CopyIn(CopyError),

    /// Caller buffer could not be fully written
    #[error("copy to caller failed: {0}")]
    CopyOut(CopyError),

    /// Minor number outside the device table
    #[error("no such device minor {0}")]
    NoDevice(u32),

    /// Major number already registered
    #[error("major {0} already registered")]
    Busy(u32),
}

#[cfg(feature = "std")]
impl From<SlotError> for std::io::Error {
    fn from(err: SlotError) -> Self {
        std::io::Error::from_raw_os_error(err.to_errno())
    }
}
