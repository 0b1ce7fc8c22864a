//! Real device node backend

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::raw::{c_int, c_ulong};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use message_slot::MSG_SLOT_CHANNEL;

use crate::{SendError, SlotDevice};

extern "C" {
    // int ioctl(int fd, unsigned long request, ...);
    fn ioctl(fd: c_int, request: c_ulong, ...) -> c_int;
}

/// An opened message slot device file
#[derive(Debug)]
pub struct DeviceNode {
    file: File,
}

impl DeviceNode {
    /// Open `path` read/write
    pub fn open(path: &Path) -> Result<Self, SendError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| SendError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl SlotDevice for DeviceNode {
    fn select_channel(&mut self, id: u64) -> io::Result<()> {
        // SAFETY: the fd is owned by `self.file` and stays open for the call;
        // the argument is passed by value.
        let rc = unsafe {
            ioctl(
                self.file.as_raw_fd(),
                MSG_SLOT_CHANNEL as c_ulong,
                id as c_ulong,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn write_message(&mut self, msg: &[u8]) -> io::Result<usize> {
        self.file.write(msg)
    }
}
