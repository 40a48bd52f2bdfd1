//! Handle type for saved strings.
//!
//! A handle is the only thing a caller keeps after saving a string. It packs
//! the page index and the offset of the record within that page into a
//! single integer:
//!
//! ```text
//! handle = page_index * page_size + offset
//! ```
//!
//! Page sizes are powers of two, so splitting a handle is a shift and a mask.
//!
//! # Examples
//!
//! ```
//! use stringbank::Handle;
//!
//! let h1 = Handle::from_raw(42);
//! let h2 = Handle::from_raw(42);
//!
//! assert_eq!(h1, h2);
//! assert_eq!(h1.as_usize(), 42);
//! ```

use std::fmt;

/// An opaque reference to a string saved in a [`StringBank`](crate::StringBank).
///
/// Handles are:
/// - Valid only for the bank that issued them
/// - Stable until that bank is closed
/// - Never reused while the bank is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(usize);

impl Handle {
    /// Wraps a raw handle value, e.g. one read back from a side table.
    ///
    /// # Examples
    ///
    /// ```
    /// use stringbank::Handle;
    ///
    /// let handle = Handle::from_raw(262_149);
    /// assert_eq!(handle.as_usize(), 262_149);
    /// ```
    #[must_use]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Builds a handle from a page index and an offset within that page.
    #[must_use]
    pub(crate) const fn compose(page_index: usize, offset: usize, page_shift: u32) -> Self {
        Self((page_index << page_shift) | offset)
    }

    /// Splits the handle into `(page_index, offset)`.
    #[must_use]
    #[inline(always)]
    pub(crate) const fn split(self, page_shift: u32) -> (usize, usize) {
        let mask = (1usize << page_shift) - 1;
        (self.0 >> page_shift, self.0 & mask)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

impl From<Handle> for usize {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIFT: u32 = 18;

    #[test]
    fn test_handle_compose_split() {
        let handle = Handle::compose(3, 1234, SHIFT);

        assert_eq!(handle.as_usize(), 3 * (1 << SHIFT) + 1234);
        assert_eq!(handle.split(SHIFT), (3, 1234));
    }

    #[test]
    fn test_handle_first_page() {
        let handle = Handle::compose(0, 0, SHIFT);
        assert_eq!(handle.as_usize(), 0);
        assert_eq!(handle.split(SHIFT), (0, 0));

        let last = Handle::compose(0, (1 << SHIFT) - 1, SHIFT);
        assert_eq!(last.split(SHIFT), (0, (1 << SHIFT) - 1));
    }

    #[test]
    fn test_handle_ord_follows_pages() {
        let early = Handle::compose(0, 200_000, SHIFT);
        let late = Handle::compose(1, 0, SHIFT);
        assert!(early < late);
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(format!("{}", Handle::from_raw(42)), "Handle(42)");
    }

    #[test]
    fn test_handle_into_usize() {
        let raw: usize = Handle::from_raw(7).into();
        assert_eq!(raw, 7);
    }
}
