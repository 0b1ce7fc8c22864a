//! Kern subsystem - caller memory access and ioctl encoding

pub mod copyio;
pub mod ioctl;

pub use copyio::{copyin, copyout, CopyError, CopyResult, UserSliceReader, UserSliceWriter};
pub use ioctl::iow;
