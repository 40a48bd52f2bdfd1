//! Pages mapped directly from the operating system.
//!
//! [`MappedProvider`] bypasses the global allocator and asks the kernel for
//! private, anonymous, read-write mappings. The bytes live outside any heap
//! the process manages, are zero-filled by the kernel, and go back to the OS
//! the moment they are unmapped.
//!
//! Failures of `mmap` or `munmap` are reported as [`Error::Map`] and
//! [`Error::Unmap`]. Nothing is retried.
//!
//! # Examples
//!
//! ```
//! use stringbank::mapped::MappedProvider;
//! use stringbank::page::PageProvider;
//!
//! let mut provider = MappedProvider::new();
//! let mut page = provider.allocate(1 << 18).unwrap();
//!
//! page[0] = 42;
//! assert_eq!(page[0], 42);
//!
//! provider.release(page).unwrap();
//! ```

use std::io;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::error::{Error, Result};
use crate::page::PageProvider;

/// A page backed by an anonymous private mapping.
///
/// Dropping a page unmaps it. [`MappedProvider::release`] does the same but
/// reports a failing `munmap` instead of logging it.
pub struct MappedPage {
    /// Start of the mapping.
    start: NonNull<u8>,
    /// Length of the mapping in bytes.
    len: usize,
}

// SAFETY: MappedPage exclusively owns its mapping.
unsafe impl Send for MappedPage {}
unsafe impl Sync for MappedPage {}

impl MappedPage {
    fn map(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidPageSize(size));
        }

        // SAFETY: a fresh anonymous mapping aliases no existing memory.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if addr == libc::MAP_FAILED {
            return Err(Error::Map {
                size,
                source: io::Error::last_os_error(),
            });
        }

        let start = NonNull::new(addr.cast::<u8>()).ok_or_else(|| Error::Map {
            size,
            source: io::Error::from(io::ErrorKind::AddrNotAvailable),
        })?;

        Ok(MappedPage { start, len: size })
    }

    /// Unmaps the page, reporting the OS error if `munmap` fails.
    fn unmap(self) -> Result<()> {
        let (start, len) = (self.start, self.len);
        std::mem::forget(self);

        // SAFETY: start/len describe a live mapping created by MappedPage::map,
        // and forgetting self above guarantees it is unmapped only once.
        let rc = unsafe { libc::munmap(start.as_ptr().cast(), len) };
        if rc != 0 {
            return Err(Error::Unmap {
                size: len,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }
}

impl Deref for MappedPage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: the mapping is len bytes long, readable, and zero-filled by
        // the kernel, so every byte is initialized.
        unsafe { std::slice::from_raw_parts(self.start.as_ptr(), self.len) }
    }
}

impl DerefMut for MappedPage {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above; the mapping is writable and &mut self is exclusive.
        unsafe { std::slice::from_raw_parts_mut(self.start.as_ptr(), self.len) }
    }
}

impl Drop for MappedPage {
    fn drop(&mut self) {
        // SAFETY: start/len describe a live mapping owned by this page.
        let rc = unsafe { libc::munmap(self.start.as_ptr().cast(), self.len) };
        if rc != 0 {
            tracing::warn!(
                size = self.len,
                error = %io::Error::last_os_error(),
                "failed to unmap dropped page"
            );
        }
    }
}

/// Page provider that maps pages directly from the OS.
///
/// Use it when the bank holds enough data that keeping it out of the
/// allocator's bookkeeping matters, or when memory must be handed back to the
/// OS deterministically on close.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappedProvider;

impl MappedProvider {
    /// Creates a mapped provider.
    #[must_use]
    pub const fn new() -> Self {
        MappedProvider
    }
}

impl PageProvider for MappedProvider {
    type Page = MappedPage;

    fn allocate(&mut self, size: usize) -> Result<MappedPage> {
        MappedPage::map(size)
    }

    fn release(&mut self, page: MappedPage) -> Result<()> {
        page.unmap()
    }
}
