//! POSIX errno.h - error codes
//!
//! Only the values the message slot driver can report are listed; the
//! numbering follows Linux/x86_64.

use crate::error::SlotError;

pub const EFAULT: i32 = 14; // Bad address
pub const EAGAIN: i32 = 11; // Try again
pub const ENOMEM: i32 = 12; // Out of memory
pub const EBUSY: i32 = 16; // Device or resource busy
pub const ENXIO: i32 = 6; // No such device or address
pub const EINVAL: i32 = 22; // Invalid argument
pub const ENOSPC: i32 = 28; // No space left on device
pub const EMSGSIZE: i32 = 90; // Message too long
pub const EWOULDBLOCK: i32 = EAGAIN; // Operation would block

impl SlotError {
    /// Convert SlotError to POSIX errno value
    pub fn to_errno(&self) -> i32 {
        match self {
            SlotError::InvalidArgument => EINVAL,
            SlotError::Unbound => EINVAL,
            SlotError::MessageSize(_) => EMSGSIZE,
            SlotError::WouldBlock => EWOULDBLOCK,
            SlotError::NoSpace { .. } => ENOSPC,
            SlotError::NoMemory => ENOMEM,
            SlotError::CopyIn(_) => ENOSPC, // short copy from the caller
            SlotError::CopyOut(_) => EFAULT,
            SlotError::NoDevice(_) => ENXIO,
            SlotError::Busy(_) => EBUSY,
        }
    }
}
