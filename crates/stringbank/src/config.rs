//! Bank configuration.
//!
//! # Examples
//!
//! ```
//! use stringbank::{BankConfig, ReadMode};
//!
//! let config = BankConfig::default()
//!     .with_page_size(64 * 1024)
//!     .with_read_mode(ReadMode::Copied);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Error, Result};

/// Default page size (256 KiB).
pub const PAGE_SIZE: usize = 1 << 18;

/// Smallest accepted page size (one OS page on common platforms).
pub const MIN_PAGE_SIZE: usize = 4096;

/// How [`StringBank::fetch`](crate::StringBank::fetch) hands strings back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Return a view into the bank's pages, valid while the bank is borrowed.
    #[default]
    Borrowed,
    /// Copy the string out of the bank.
    Copied,
}

/// Configuration for a [`StringBank`](crate::StringBank).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankConfig {
    /// Size of each page in bytes. Must be a power of two, at least
    /// [`MIN_PAGE_SIZE`].
    pub page_size: usize,
    /// Read behaviour of `fetch`.
    pub read_mode: ReadMode,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            read_mode: ReadMode::Borrowed,
        }
    }
}

impl BankConfig {
    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the read mode.
    #[must_use]
    pub const fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`] if the page size is not a power of
    /// two or is below [`MIN_PAGE_SIZE`].
    pub fn validate(&self) -> Result<()> {
        if self.page_size < MIN_PAGE_SIZE || !self.page_size.is_power_of_two() {
            return Err(Error::InvalidPageSize(self.page_size));
        }
        Ok(())
    }

    /// Shift that turns a handle into its page index.
    pub(crate) const fn page_shift(&self) -> u32 {
        self.page_size.trailing_zeros()
    }
}
