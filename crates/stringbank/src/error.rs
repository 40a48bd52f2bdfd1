//! Error types for the string bank.
//!
//! Only two things can really go wrong: the page provider cannot obtain or
//! return memory, or the caller breaks a contract (oversized record, foreign
//! handle). Both are reported through [`Error`].

use std::io;

use thiserror::Error;

use crate::handle::Handle;

/// Errors that can occur while saving, reading or releasing strings.
#[derive(Debug, Error)]
pub enum Error {
    /// The OS refused to map a page.
    #[error("failed to map {size} bytes: {source}")]
    Map {
        /// The requested mapping size.
        size: usize,
        /// The error reported by `mmap`.
        #[source]
        source: io::Error,
    },

    /// The OS refused to unmap a page.
    #[error("failed to unmap {size} bytes: {source}")]
    Unmap {
        /// The size of the mapping being released.
        size: usize,
        /// The error reported by `munmap`.
        #[source]
        source: io::Error,
    },

    /// The global allocator could not provide a page.
    #[error("out of memory: failed to allocate page of {size} bytes")]
    OutOfMemory {
        /// The requested page size.
        size: usize,
    },

    /// A record (prefix plus payload) would not fit in a single page.
    #[error("record of {required} bytes does not fit in a {page_size}-byte page")]
    RecordTooLarge {
        /// Bytes needed for the prefix and the payload.
        required: usize,
        /// The configured page size.
        page_size: usize,
    },

    /// The handle does not point at a record written by this bank.
    #[error("invalid handle {0}")]
    InvalidHandle(Handle),

    /// The buffer ended before a terminating prefix byte was seen.
    #[error("length prefix is truncated")]
    TruncatedPrefix,

    /// The prefix has more continuation groups than fit in a `u64`.
    #[error("length prefix overflows 64 bits")]
    PrefixOverflow,

    /// The configured page size is unusable.
    #[error("invalid page size {0}: must be a power of two of at least 4096 bytes")]
    InvalidPageSize(usize),
}

/// Result type for string bank operations.
pub type Result<T> = std::result::Result<T, Error>;
