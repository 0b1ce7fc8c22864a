//! ioctl Command Encoding
//!
//! Linux `_IOC` layout: `dir:2 | size:14 | type:8 | nr:8`, high to low.

pub const IOC_NRBITS: u32 = 8;
pub const IOC_TYPEBITS: u32 = 8;
pub const IOC_SIZEBITS: u32 = 14;

pub const IOC_NRSHIFT: u32 = 0;
pub const IOC_TYPESHIFT: u32 = IOC_NRSHIFT + IOC_NRBITS;
pub const IOC_SIZESHIFT: u32 = IOC_TYPESHIFT + IOC_TYPEBITS;
pub const IOC_DIRSHIFT: u32 = IOC_SIZESHIFT + IOC_SIZEBITS;

/// Transfer direction of an ioctl argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum IocDir {
    None = 0,
    Write = 1,
    Read = 2,
    ReadWrite = 3,
}

/// `_IOC(dir, type, nr, size)`
pub const fn ioc(dir: IocDir, ty: u32, nr: u32, size: u32) -> u32 {
    ((dir as u32) << IOC_DIRSHIFT)
        | (ty << IOC_TYPESHIFT)
        | (nr << IOC_NRSHIFT)
        | (size << IOC_SIZESHIFT)
}

/// `_IOW(type, nr, T)`
pub const fn iow<T>(ty: u32, nr: u32) -> u32 {
    ioc(IocDir::Write, ty, nr, core::mem::size_of::<T>() as u32)
}
