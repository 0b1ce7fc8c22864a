//! Minimal POSIX surface used by the driver
//!
//! Errors leave the driver as plain errno values, the way a character device
//! reports them to user space.

pub mod errno;
