//! Character Device Glue
//!
//! The seam between file-descriptor style calls and a driver:
//! - [`FileOperations`]: the entry points a driver implements
//! - [`OpenFile`]: one open file description and its per-handle state
//! - [`conf`]: major number registration

pub mod conf;

use crate::error::Result;
use crate::kern::copyio::{UserSliceReader, UserSliceWriter};

pub use conf::{CharDevTable, Registration};

/// Driver entry points, one call per file operation
pub trait FileOperations: Send + Sync {
    /// State attached to each open handle
    type Data: Send;

    /// Open the device with the given minor number
    fn open(&self, minor: u32) -> Result<Self::Data>;

    /// Control request (`unlocked_ioctl`)
    fn ioctl(&self, data: &mut Self::Data, cmd: u32, arg: u64) -> Result<()>;

    /// Copy data out to the caller
    fn read(&self, data: &Self::Data, writer: &mut UserSliceWriter<'_>) -> Result<usize>;

    /// Copy data in from the caller
    fn write(&self, data: &Self::Data, reader: &UserSliceReader<'_>) -> Result<usize>;

    /// Last reference to the handle is gone
    fn release(&self, _data: &mut Self::Data) {}
}

/// An open file on a character device.
///
/// Borrows the driver, so the driver cannot be torn down while a file is
/// still open.
pub struct OpenFile<'a, T: FileOperations> {
    ops: &'a T,
    data: T::Data,
}

impl<'a, T: FileOperations> OpenFile<'a, T> {
    /// Open `minor` on the driver
    pub fn open(ops: &'a T, minor: u32) -> Result<Self> {
        let data = ops.open(minor)?;
        Ok(Self { ops, data })
    }

    pub fn ioctl(&mut self, cmd: u32, arg: u64) -> Result<()> {
        self.ops.ioctl(&mut self.data, cmd, arg)
    }

    /// Read into a fully accessible buffer
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.read_from(&mut UserSliceWriter::new(buf))
    }

    pub fn read_from(&self, writer: &mut UserSliceWriter<'_>) -> Result<usize> {
        self.ops.read(&self.data, writer)
    }

    /// Write a fully accessible buffer
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        self.write_from(&UserSliceReader::new(buf))
    }

    pub fn write_from(&self, reader: &UserSliceReader<'_>) -> Result<usize> {
        self.ops.write(&self.data, reader)
    }

    /// Per-handle driver state
    pub fn data(&self) -> &T::Data {
        &self.data
    }
}

impl<T: FileOperations> Drop for OpenFile<'_, T> {
    fn drop(&mut self) {
        self.ops.release(&mut self.data);
    }
}

impl<T: FileOperations> core::fmt::Debug for OpenFile<'_, T>
where
    T::Data: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenFile").field("data", &self.data).finish()
    }
}
