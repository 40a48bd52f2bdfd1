//! Page providers.
//!
//! A [`StringBank`](crate::StringBank) never talks to an allocator directly.
//! It asks a [`PageProvider`] for fixed-size, zeroed byte regions and hands
//! them back when it is closed. Two providers ship with the crate:
//!
//! - [`HeapProvider`]: pages come from the global allocator
//! - [`MappedProvider`](crate::mapped::MappedProvider): pages are anonymous
//!   private mappings obtained straight from the OS (unix, `mapped` feature)
//!
//! # Examples
//!
//! ```
//! use stringbank::page::{HeapProvider, PageProvider};
//!
//! let mut provider = HeapProvider::new();
//! let page = provider.allocate(4096).unwrap();
//!
//! assert_eq!(page.len(), 4096);
//! assert!(page.iter().all(|&b| b == 0));
//!
//! provider.release(page).unwrap();
//! ```

use std::alloc::{self, Layout};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// Alignment of heap pages.
const PAGE_ALIGNMENT: usize = 8;

/// Source of the fixed-size byte regions a bank writes records into.
///
/// Implementations must return pages that are exactly `size` bytes long and
/// zero-initialized. A page is handed back through [`release`](Self::release)
/// exactly once; the bank never touches it afterwards.
pub trait PageProvider {
    /// The owned page type.
    type Page: Deref<Target = [u8]> + DerefMut;

    /// Obtains a zeroed page of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing memory cannot be obtained.
    fn allocate(&mut self, size: usize) -> Result<Self::Page>;

    /// Returns a page to the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing memory cannot be returned. The page is
    /// consumed either way.
    fn release(&mut self, page: Self::Page) -> Result<()>;
}

/// A zeroed page allocated from the global allocator.
///
/// The memory is returned to the allocator when the page is dropped.
pub struct HeapPage {
    /// Start of the page's memory region.
    start: NonNull<u8>,
    /// Length of the page in bytes.
    len: usize,
}

// SAFETY: HeapPage exclusively owns its allocation, like a Box<[u8]>.
unsafe impl Send for HeapPage {}
unsafe impl Sync for HeapPage {}

impl HeapPage {
    fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidPageSize(size));
        }

        let layout = Layout::from_size_align(size, PAGE_ALIGNMENT)
            .map_err(|_| Error::OutOfMemory { size })?;

        // SAFETY: layout has a non-zero size (checked above).
        let start = unsafe { alloc::alloc_zeroed(layout) };
        let start = NonNull::new(start).ok_or(Error::OutOfMemory { size })?;

        Ok(HeapPage { start, len: size })
    }
}

impl Deref for HeapPage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: start points to len initialized bytes owned by this page.
        unsafe { std::slice::from_raw_parts(self.start.as_ptr(), self.len) }
    }
}

impl DerefMut for HeapPage {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.start.as_ptr(), self.len) }
    }
}

impl Drop for HeapPage {
    fn drop(&mut self) {
        // SAFETY: the same layout was used in HeapPage::new, which succeeded.
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.len, PAGE_ALIGNMENT);
            alloc::dealloc(self.start.as_ptr(), layout);
        }
    }
}

/// Page provider backed by the global allocator.
///
/// Releasing a page frees it immediately; this cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapProvider;

impl HeapProvider {
    /// Creates a heap provider.
    #[must_use]
    pub const fn new() -> Self {
        HeapProvider
    }
}

impl PageProvider for HeapProvider {
    type Page = HeapPage;

    fn allocate(&mut self, size: usize) -> Result<HeapPage> {
        HeapPage::new(size)
    }

    fn release(&mut self, page: HeapPage) -> Result<()> {
        drop(page);
        Ok(())
    }
}
