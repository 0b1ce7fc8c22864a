//! Copyin/Copyout - Caller↔Driver Data Transfer
//!
//! A read or write hands the driver a region of caller memory. The region has
//! a declared length, but only a prefix of it may actually be accessible
//! (unmapped or read-only pages past that point). These functions move bytes
//! across the boundary and report a fault instead of touching inaccessible
//! memory.
//!
//! ## Partial copies
//!
//! Like `copy_from_user`/`copy_to_user`, a faulting copy may have moved the
//! accessible prefix before failing. Callers that must not expose partial
//! data copy into a private staging buffer first and only commit after the
//! whole copy succeeded.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Copy operation result
pub type CopyResult = Result<usize, CopyError>;

/// Errors that can occur during copy operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyError {
    /// Null region or copy past the declared end
    #[error("bad address")]
    BadAddress,
    /// Source region not fully readable
    #[error("page fault")]
    PageFault,
    /// Destination region not fully writable
    #[error("protection violation")]
    Protection,
}

// ============================================================================
// Region Validation
// ============================================================================

fn validate_region(is_null: bool, declared: usize, size: usize) -> Result<(), CopyError> {
    if is_null {
        return Err(CopyError::BadAddress);
    }

    if size > declared {
        return Err(CopyError::BadAddress);
    }

    Ok(())
}

// ============================================================================
// Caller Regions
// ============================================================================

/// Caller memory the driver reads from (the source of a write)
#[derive(Debug, Clone, Copy)]
pub struct UserSliceReader<'a> {
    data: Option<&'a [u8]>,
    len: usize,
    mapped: usize,
}

impl<'a> UserSliceReader<'a> {
    /// A fully accessible region
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data: Some(data),
            len: data.len(),
            mapped: data.len(),
        }
    }

    /// A null pointer with a declared length
    pub fn null(len: usize) -> Self {
        Self {
            data: None,
            len,
            mapped: 0,
        }
    }

    /// A region whose bytes past `mapped` fault when touched
    pub fn with_fault(data: &'a [u8], mapped: usize) -> Self {
        Self {
            data: Some(data),
            len: data.len(),
            mapped: mapped.min(data.len()),
        }
    }

    /// Declared length of the region
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }
}

/// Caller memory the driver writes into (the destination of a read)
#[derive(Debug)]
pub struct UserSliceWriter<'a> {
    data: Option<&'a mut [u8]>,
    len: usize,
    mapped: usize,
}

impl<'a> UserSliceWriter<'a> {
    /// A fully accessible region
    pub fn new(data: &'a mut [u8]) -> Self {
        let len = data.len();
        Self {
            data: Some(data),
            len,
            mapped: len,
        }
    }

    /// A null pointer with a declared capacity
    pub fn null(len: usize) -> Self {
        Self {
            data: None,
            len,
            mapped: 0,
        }
    }

    /// A region whose bytes past `mapped` are read-only
    pub fn with_fault(data: &'a mut [u8], mapped: usize) -> Self {
        let len = data.len();
        Self {
            data: Some(data),
            len,
            mapped: mapped.min(len),
        }
    }

    /// Declared capacity of the region
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }
}

// ============================================================================
// Copyin - Caller → Driver
// ============================================================================

/// Copy `kernel_dst.len()` bytes from the start of a caller region
///
/// # Returns
/// * `Ok(bytes_copied)` on success
/// * `Err(CopyError::PageFault)` if the region is not readable that far;
///   the accessible prefix has been copied
pub fn copyin(user_src: &UserSliceReader<'_>, kernel_dst: &mut [u8]) -> CopyResult {
    let size = kernel_dst.len();
    validate_region(user_src.is_null(), user_src.len, size)?;

    let src = user_src.data.ok_or(CopyError::BadAddress)?;
    let readable = size.min(user_src.mapped);
    kernel_dst[..readable].copy_from_slice(&src[..readable]);

    if readable < size {
        return Err(CopyError::PageFault);
    }

    Ok(size)
}

// ============================================================================
// Copyout - Driver → Caller
// ============================================================================

/// Copy all of `kernel_src` to the start of a caller region
///
/// # Returns
/// * `Ok(bytes_copied)` on success
/// * `Err(CopyError::Protection)` if the region is not writable that far;
///   the writable prefix has been filled
pub fn copyout(kernel_src: &[u8], user_dst: &mut UserSliceWriter<'_>) -> CopyResult {
    let size = kernel_src.len();
    validate_region(user_dst.is_null(), user_dst.len, size)?;

    let mapped = user_dst.mapped;
    let dst = user_dst.data.as_deref_mut().ok_or(CopyError::BadAddress)?;
    let writable = size.min(mapped);
    dst[..writable].copy_from_slice(&kernel_src[..writable]);

    if writable < size {
        return Err(CopyError::Protection);
    }

    Ok(size)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copyin_full() {
        let src = UserSliceReader::new(b"hello");
        let mut dst = [0u8; 5];
        assert_eq!(copyin(&src, &mut dst), Ok(5));
        assert_eq!(&dst, b"hello");
    }

    #[test]
    fn test_copyin_null() {
        let src = UserSliceReader::null(4);
        let mut dst = [0u8; 4];
        assert_eq!(copyin(&src, &mut dst), Err(CopyError::BadAddress));
    }

    #[test]
    fn test_copyin_past_declared_end() {
        let src = UserSliceReader::new(b"ab");
        let mut dst = [0u8; 3];
        assert_eq!(copyin(&src, &mut dst), Err(CopyError::BadAddress));
    }

    #[test]
    fn test_copyin_fault_copies_prefix() {
        let src = UserSliceReader::with_fault(b"abcdef", 2);
        let mut dst = [0u8; 6];
        assert_eq!(copyin(&src, &mut dst), Err(CopyError::PageFault));
        assert_eq!(&dst[..2], b"ab");
        assert_eq!(&dst[2..], &[0; 4]);
    }

    #[test]
    fn test_copyout_full_and_short_destination() {
        let mut buf = [0u8; 8];
        let mut dst = UserSliceWriter::new(&mut buf);
        assert_eq!(copyout(b"xyz", &mut dst), Ok(3));
        assert_eq!(&buf[..3], b"xyz");

        let mut small = [0u8; 2];
        let mut dst = UserSliceWriter::new(&mut small);
        assert_eq!(copyout(b"xyz", &mut dst), Err(CopyError::BadAddress));
    }

    #[test]
    fn test_copyout_protection() {
        let mut buf = [0u8; 4];
        let mut dst = UserSliceWriter::with_fault(&mut buf, 1);
        assert_eq!(copyout(b"abc", &mut dst), Err(CopyError::Protection));
        assert_eq!(buf, [b'a', 0, 0, 0]);
    }
}
