//! Write-once string storage outside the general-purpose heap.
//!
//! This crate stores large numbers of immutable strings compactly and hands
//! back a small integer [`Handle`] for each one:
//!
//! - **String bank**: append-only pages of length-prefixed records
//! - **Length codec**: base-128 varint, one byte for strings under 128 bytes
//! - **Page providers**: global-allocator pages or OS-mapped pages
//!   (`mapped` feature, unix only)
//!
//! # Example
//!
//! ```
//! use stringbank::StringBank;
//!
//! let mut bank = StringBank::new();
//!
//! let handles: Vec<_> = ["hello", "goodbye", "cheese"]
//!     .iter()
//!     .map(|s| bank.save(s).unwrap())
//!     .collect();
//!
//! assert_eq!(bank.get(handles[1]).unwrap(), "goodbye");
//! ```

pub mod bank;
pub mod codec;
pub mod config;
pub mod error;
pub mod handle;
#[cfg(all(unix, feature = "mapped"))]
pub mod mapped;
pub mod page;

pub use bank::{BankStats, StringBank};
pub use config::{BankConfig, MIN_PAGE_SIZE, PAGE_SIZE, ReadMode};
pub use error::{Error, Result};
pub use handle::Handle;
#[cfg(all(unix, feature = "mapped"))]
pub use mapped::{MappedPage, MappedProvider};
pub use page::{HeapPage, HeapProvider, PageProvider};
