//! Write-once string arena.
//!
//! A [`StringBank`] packs strings into fixed-size pages and hands back a
//! [`Handle`] for each one. The handle is exchanged for the string later.
//! Strings are never moved, modified or freed individually; all pages go back
//! to the [`PageProvider`] at once on [`close`](StringBank::close) or drop.
//!
//! # Layout
//!
//! ```text
//! page 0                                    page 1
//! ┌──────┬─────────┬──────┬───────────┬───┐ ┌──────┬──────────────┬───────┐
//! │ 0x05 │ "hello" │ 0x07 │ "goodbye" │ … │ │ 0x80 │ 0x01 │ 128 B │ free  │
//! └──────┴─────────┴──────┴───────────┴───┘ └──────┴──────┴───────┴───────┘
//!  ^ handle 0         ^ handle 6                ^ handle page_size
//! ```
//!
//! Each record is a [`codec`] length prefix followed by the UTF-8 bytes. A
//! record never spans two pages: if it does not fit in the current page, a
//! new page is allocated and the tail of the old one stays unused.
//!
//! # Examples
//!
//! ```
//! use stringbank::StringBank;
//!
//! let mut bank = StringBank::new();
//!
//! let hello = bank.save("hello").unwrap();
//! let goodbye = bank.save("goodbye").unwrap();
//!
//! assert_eq!(bank.get(hello).unwrap(), "hello");
//! assert_eq!(bank.get(goodbye).unwrap(), "goodbye");
//! assert_eq!(bank.size(), 1 << 18);
//! ```

use std::borrow::Cow;

use crate::codec;
use crate::config::{BankConfig, ReadMode};
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::page::{HeapProvider, PageProvider};

/// Prefix bytes below this value are complete one-byte lengths.
const SHORT_LEN_LIMIT: usize = 0x80;

/// Bank occupancy statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankStats {
    /// Number of pages held by the bank.
    pub page_count: usize,
    /// Total bytes of all pages.
    pub capacity: usize,
    /// Bytes taken by records (prefixes and payloads).
    pub bytes_used: usize,
    /// Bytes left unused at the end of full pages.
    pub bytes_wasted: usize,
}

/// A page and the number of bytes written into it.
struct Slot<T> {
    page: T,
    used: usize,
}

/// Append-only string storage addressed by [`Handle`]s.
///
/// The bank is generic over where its pages come from. [`StringBank::new`]
/// uses the global allocator; `StringBank::mapped` (unix, `mapped` feature)
/// maps pages straight from the OS.
///
/// # Thread Safety
///
/// Saving needs `&mut self`, reading needs `&self`, so the borrow checker
/// enforces the single-writer model. Wrap the bank in a lock to share it
/// between writers.
///
/// # Lifetime
///
/// Strings returned by [`get`](Self::get) borrow the bank, so the bank can
/// neither be closed nor dropped while they are alive. Handles are plain
/// integers and outlive nothing: after [`close`](Self::close) they no longer
/// refer to anything.
pub struct StringBank<P: PageProvider = HeapProvider> {
    /// Source of pages.
    provider: P,
    /// Pages in allocation order; the last one is current.
    pages: Vec<Slot<P::Page>>,
    /// Page size and read mode.
    config: BankConfig,
    /// log2 of the page size.
    page_shift: u32,
}

impl StringBank<HeapProvider> {
    /// Creates an empty bank backed by the global allocator, with
    /// [`PAGE_SIZE`](crate::PAGE_SIZE) pages.
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(HeapProvider::new())
    }
}

impl Default for StringBank<HeapProvider> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(unix, feature = "mapped"))]
impl StringBank<crate::mapped::MappedProvider> {
    /// Creates an empty bank whose pages are mapped directly from the OS.
    ///
    /// # Examples
    ///
    /// ```
    /// use stringbank::StringBank;
    ///
    /// let mut bank = StringBank::mapped();
    /// let handle = bank.save("cheese").unwrap();
    /// assert_eq!(bank.get(handle).unwrap(), "cheese");
    ///
    /// bank.close().unwrap();
    /// ```
    #[must_use]
    pub fn mapped() -> Self {
        Self::with_provider(crate::mapped::MappedProvider::new())
    }
}

impl<P: PageProvider> StringBank<P> {
    /// Creates an empty bank with the default configuration.
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        let config = BankConfig::default();
        Self {
            provider,
            pages: Vec::new(),
            page_shift: config.page_shift(),
            config,
        }
    }

    /// Creates an empty bank with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`] if the configuration is rejected by
    /// [`BankConfig::validate`].
    pub fn with_config(provider: P, config: BankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            pages: Vec::new(),
            page_shift: config.page_shift(),
            config,
        })
    }

    /// Copies `s` into the bank and returns its handle.
    ///
    /// # Errors
    ///
    /// - [`Error::RecordTooLarge`] if the length prefix plus `s` exceeds the
    ///   page size.
    /// - Any error from the page provider when a new page is needed.
    pub fn save(&mut self, s: &str) -> Result<Handle> {
        let len = s.len();

        if len < SHORT_LEN_LIMIT {
            let (handle, buf) = self.reserve(len + 1)?;
            buf[0] = len as u8;
            buf[1..].copy_from_slice(s.as_bytes());
            return Ok(handle);
        }

        let required = codec::encoded_width(len as u64) + len;
        if required > self.config.page_size {
            return Err(Error::RecordTooLarge {
                required,
                page_size: self.config.page_size,
            });
        }

        let (handle, buf) = self.reserve(required)?;
        let start = codec::encode(len as u64, buf);
        buf[start..].copy_from_slice(s.as_bytes());
        Ok(handle)
    }

    /// Finds `len` contiguous bytes in the current page, starting a new page
    /// if they do not fit.
    ///
    /// `len` must not exceed the page size.
    fn reserve(&mut self, len: usize) -> Result<(Handle, &mut [u8])> {
        let page_size = self.config.page_size;
        if self.pages.last().is_none_or(|slot| slot.used + len > page_size) {
            self.grow()?;
        }

        let index = self.pages.len() - 1;
        let slot = &mut self.pages[index];
        let offset = slot.used;
        slot.used += len;

        let handle = Handle::compose(index, offset, self.page_shift);
        Ok((handle, &mut slot.page[offset..offset + len]))
    }

    /// Appends a fresh page from the provider.
    #[cold]
    fn grow(&mut self) -> Result<()> {
        let page_size = self.config.page_size;
        let page = self.provider.allocate(page_size)?;
        debug_assert_eq!(page.len(), page_size);

        self.pages.push(Slot { page, used: 0 });
        tracing::debug!(pages = self.pages.len(), page_size, "allocated page");
        Ok(())
    }

    /// Returns the string saved under `handle`, borrowed from the bank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `handle` does not point at a
    /// complete record inside the written part of a page, or the record is
    /// not UTF-8. A handle from another bank may still pass these checks and
    /// yield an unrelated string.
    pub fn get(&self, handle: Handle) -> Result<&str> {
        let bytes = self.record(handle).ok_or(Error::InvalidHandle(handle))?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidHandle(handle))
    }

    /// Returns the payload of the record at `handle`, if it is in bounds.
    #[inline]
    fn record(&self, handle: Handle) -> Option<&[u8]> {
        let (index, offset) = handle.split(self.page_shift);
        let slot = self.pages.get(index)?;
        let written = slot.page.get(offset..slot.used)?;

        let (len, width) = codec::decode(written).ok()?;
        let end = width.checked_add(usize::try_from(len).ok()?)?;
        written.get(width..end)
    }

    /// Returns the string saved under `handle` without any validation.
    ///
    /// # Safety
    ///
    /// `handle` must have been returned by [`save`](Self::save) on this bank
    /// and the bank must not have been closed since.
    #[must_use]
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, handle: Handle) -> &str {
        let (index, offset) = handle.split(self.page_shift);

        // SAFETY: the caller guarantees handle names a record written by
        // save, so the page exists, the prefix is complete, the payload lies
        // inside the page and is valid UTF-8 copied from a &str.
        unsafe {
            let data = self.pages.get_unchecked(index).page.get_unchecked(offset..);
            let (len, width) = match *data.get_unchecked(0) {
                b if usize::from(b) < SHORT_LEN_LIMIT => (usize::from(b), 1),
                _ => {
                    let (len, width) = codec::decode(data).unwrap_unchecked();
                    (len as usize, width)
                }
            };
            std::str::from_utf8_unchecked(data.get_unchecked(width..width + len))
        }
    }

    /// Returns an owned copy of the string saved under `handle`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_owned(&self, handle: Handle) -> Result<String> {
        self.get(handle).map(str::to_owned)
    }

    /// Returns the string saved under `handle`, borrowed or copied according
    /// to the configured [`ReadMode`].
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn fetch(&self, handle: Handle) -> Result<Cow<'_, str>> {
        match self.config.read_mode {
            ReadMode::Borrowed => self.get(handle).map(Cow::Borrowed),
            ReadMode::Copied => self.get_owned(handle).map(Cow::Owned),
        }
    }

    /// Returns the bytes held by the bank, counting unused space.
    #[must_use]
    pub fn size(&self) -> usize {
        self.pages.len() * self.config.page_size
    }

    /// Returns the number of pages held by the bank.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the configured page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Returns the index of the page `handle` points into.
    ///
    /// # Examples
    ///
    /// ```
    /// use stringbank::StringBank;
    ///
    /// let mut bank = StringBank::new();
    /// let handle = bank.save("hello").unwrap();
    ///
    /// assert_eq!(bank.page_index(handle), 0);
    /// assert_eq!(bank.offset(handle), 0);
    /// ```
    #[must_use]
    pub fn page_index(&self, handle: Handle) -> usize {
        handle.split(self.page_shift).0
    }

    /// Returns the offset of `handle`'s record within its page.
    #[must_use]
    pub fn offset(&self, handle: Handle) -> usize {
        handle.split(self.page_shift).1
    }

    /// Returns true if the bank holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns the bank's configuration.
    #[must_use]
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Returns the page provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns occupancy statistics.
    #[must_use]
    pub fn stats(&self) -> BankStats {
        let page_size = self.config.page_size;
        let bytes_used = self.pages.iter().map(|slot| slot.used).sum();
        let full = self.pages.len().saturating_sub(1);
        let bytes_wasted = self.pages[..full]
            .iter()
            .map(|slot| page_size - slot.used)
            .sum();

        BankStats {
            page_count: self.pages.len(),
            capacity: self.size(),
            bytes_used,
            bytes_wasted,
        }
    }

    /// Releases every page, leaving the bank empty and reusable.
    ///
    /// All handles issued so far stop referring to anything.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the provider. Pages are released
    /// newest first, so on failure the pages not yet released are still in
    /// the bank and their handles still resolve. The page whose release
    /// failed is gone, and its index is reused by the next new page, so
    /// handles into it may resolve to strings saved later.
    pub fn close(&mut self) -> Result<()> {
        let released = self.pages.len();

        while let Some(slot) = self.pages.pop() {
            self.provider.release(slot.page)?;
            tracing::trace!(page = self.pages.len(), "released page");
        }

        if released > 0 {
            tracing::debug!(
                pages = released,
                bytes = released * self.config.page_size,
                "closed string bank"
            );
        }
        Ok(())
    }
}

impl<P: PageProvider> Drop for StringBank<P> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "failed to release pages of dropped string bank");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_PAGE_SIZE;
    use crate::page::HeapPage;
    use std::cell::Cell;
    use std::rc::Rc;

    fn small_bank() -> StringBank {
        let config = BankConfig::default().with_page_size(MIN_PAGE_SIZE);
        StringBank::with_config(HeapProvider::new(), config).unwrap()
    }

    /// Heap provider that fails on demand and counts calls.
    #[derive(Default, Clone)]
    struct FlakyProvider {
        allocations_left: Rc<Cell<usize>>,
        releases_left: Rc<Cell<usize>>,
        released: Rc<Cell<usize>>,
    }

    impl FlakyProvider {
        fn new(allocations: usize, releases: usize) -> Self {
            let provider = Self::default();
            provider.allocations_left.set(allocations);
            provider.releases_left.set(releases);
            provider
        }
    }

    impl PageProvider for FlakyProvider {
        type Page = HeapPage;

        fn allocate(&mut self, size: usize) -> Result<HeapPage> {
            let left = self.allocations_left.get();
            if left == 0 {
                return Err(Error::OutOfMemory { size });
            }
            self.allocations_left.set(left - 1);
            HeapProvider::new().allocate(size)
        }

        fn release(&mut self, page: HeapPage) -> Result<()> {
            let left = self.releases_left.get();
            if left == 0 {
                return Err(Error::Unmap {
                    size: page.len(),
                    source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
                });
            }
            self.releases_left.set(left - 1);
            self.released.set(self.released.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_save_and_get() {
        let mut bank = StringBank::new();

        let s1 = bank.save("hello").unwrap();
        let s2 = bank.save("goodbye").unwrap();
        let s3 = bank.save("cheese").unwrap();

        assert_eq!(bank.get(s1).unwrap(), "hello");
        assert_eq!(bank.get(s2).unwrap(), "goodbye");
        assert_eq!(bank.get(s3).unwrap(), "cheese");
    }

    #[test]
    fn test_handles_are_offsets() {
        let mut bank = StringBank::new();

        assert_eq!(bank.save("hello").unwrap().as_usize(), 0);
        assert_eq!(bank.save("goodbye").unwrap().as_usize(), 6);
        assert_eq!(bank.save("").unwrap().as_usize(), 14);
        assert_eq!(bank.save("x").unwrap().as_usize(), 15);
    }

    #[test]
    fn test_size_accounting() {
        let mut bank = StringBank::new();
        assert_eq!(bank.size(), 0);
        assert!(bank.is_empty());

        bank.save("hello").unwrap();
        assert_eq!(bank.size(), 262_144);
        assert_eq!(bank.page_count(), 1);
    }

    #[test]
    fn test_empty_string() {
        let mut bank = StringBank::new();
        let empty = bank.save("").unwrap();
        let next = bank.save("next").unwrap();

        assert_eq!(bank.get(empty).unwrap(), "");
        assert_eq!(bank.get(next).unwrap(), "next");
    }

    #[test]
    fn test_prefix_width_boundaries() {
        let mut bank = StringBank::new();
        let short = "a".repeat(127);
        let long = "b".repeat(128);
        let longer = "c".repeat(16_384);

        let h1 = bank.save(&short).unwrap();
        let h2 = bank.save(&long).unwrap();
        let h3 = bank.save(&longer).unwrap();

        assert_eq!(h2.as_usize() - h1.as_usize(), 1 + 127);
        assert_eq!(h3.as_usize() - h2.as_usize(), 2 + 128);
        assert_eq!(bank.get(h1).unwrap(), short);
        assert_eq!(bank.get(h2).unwrap(), long);
        assert_eq!(bank.get(h3).unwrap(), longer);
    }

    #[test]
    fn test_multibyte_utf8() {
        let mut bank = StringBank::new();
        let handle = bank.save("héllo wörld ✓").unwrap();
        assert_eq!(bank.get(handle).unwrap(), "héllo wörld ✓");
    }

    #[test]
    fn test_record_never_spans_pages() {
        let mut bank = small_bank();

        let first = bank.save(&"a".repeat(4000)).unwrap();
        let second = bank.save(&"b".repeat(200)).unwrap();

        assert_eq!(first.as_usize(), 0);
        assert_eq!(second.as_usize(), 4096);
        assert_eq!(bank.page_count(), 2);
        assert_eq!(bank.get(second).unwrap(), "b".repeat(200));

        let stats = bank.stats();
        assert_eq!(stats.bytes_used, 4002 + 202);
        assert_eq!(stats.bytes_wasted, 4096 - 4002);
        assert_eq!(stats.capacity, 2 * 4096);
    }

    #[test]
    fn test_page_sized_record() {
        let mut bank = small_bank();

        // Two prefix bytes plus the payload fill the page exactly.
        let exact = "z".repeat(4094);
        let handle = bank.save(&exact).unwrap();
        assert_eq!(bank.get(handle).unwrap(), exact);
        assert_eq!(bank.stats().bytes_used, 4096);

        let after = bank.save("after").unwrap();
        assert_eq!(after.as_usize(), 4096);
    }

    #[test]
    fn test_record_too_large() {
        let mut bank = small_bank();
        let err = bank.save(&"z".repeat(4095)).unwrap_err();

        assert!(matches!(
            err,
            Error::RecordTooLarge { required: 4097, page_size: 4096 }
        ));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_page_boundary_stress() {
        let mut bank = small_bank();
        let strings: Vec<String> = (0..5_000).map(|i| format!("string-{i}")).collect();

        let handles: Vec<Handle> = strings.iter().map(|s| bank.save(s).unwrap()).collect();

        assert!(bank.page_count() > 3);
        assert!(handles.windows(2).all(|w| w[0] < w[1]));

        let mut last_page = 0;
        for (s, &handle) in strings.iter().zip(&handles) {
            let page = bank.page_index(handle);
            assert!(page == last_page || page == last_page + 1);
            last_page = page;
            assert_eq!(bank.get(handle).unwrap(), s);
        }
        assert_eq!(last_page, bank.page_count() - 1);
    }

    #[test]
    fn test_invalid_handles() {
        let mut bank = StringBank::new();
        let hello = bank.save("hello").unwrap();

        // Past the written bytes.
        let beyond = Handle::from_raw(hello.as_usize() + 6);
        assert!(matches!(bank.get(beyond), Err(Error::InvalidHandle(_))));

        // Inside the payload: 'h' reads as a length running off the end.
        let inside = Handle::from_raw(hello.as_usize() + 1);
        assert!(matches!(bank.get(inside), Err(Error::InvalidHandle(_))));

        // A page that does not exist.
        let far = Handle::from_raw(10 << 18);
        assert!(matches!(bank.get(far), Err(Error::InvalidHandle(h)) if h == far));
    }

    #[test]
    fn test_get_unchecked() {
        let mut bank = small_bank();
        let handles: Vec<Handle> = (0..1_000)
            .map(|i| bank.save(&"q".repeat(i % 300)).unwrap())
            .collect();

        for (i, &handle) in handles.iter().enumerate() {
            let s = unsafe { bank.get_unchecked(handle) };
            assert_eq!(s.len(), i % 300);
        }
    }

    #[test]
    fn test_fetch_modes() {
        let mut borrowed = StringBank::new();
        let h = borrowed.save("borrowed").unwrap();
        assert!(matches!(borrowed.fetch(h).unwrap(), Cow::Borrowed("borrowed")));

        let config = BankConfig::default().with_read_mode(ReadMode::Copied);
        let mut copied = StringBank::with_config(HeapProvider::new(), config).unwrap();
        let h = copied.save("copied").unwrap();
        let value = copied.fetch(h).unwrap();
        assert!(matches!(value, Cow::Owned(_)));
        assert_eq!(value, "copied");
    }

    #[test]
    fn test_get_owned_outlives_close() {
        let mut bank = StringBank::new();
        let h = bank.save("kept").unwrap();

        let owned = bank.get_owned(h).unwrap();
        bank.close().unwrap();

        assert_eq!(owned, "kept");
    }

    #[test]
    fn test_close_and_reuse() {
        let mut bank = StringBank::new();
        let h = bank.save("hello").unwrap();
        assert_eq!(bank.get(h).unwrap(), "hello");

        bank.close().unwrap();
        assert_eq!(bank.size(), 0);
        assert!(matches!(bank.get(h), Err(Error::InvalidHandle(_))));

        let h = bank.save("hello").unwrap();
        assert_eq!(h.as_usize(), 0);
        assert_eq!(bank.get(h).unwrap(), "hello");
        assert_eq!(bank.size(), 262_144);
    }

    #[test]
    fn test_close_empty_bank() {
        let mut bank = StringBank::new();
        bank.close().unwrap();
        bank.close().unwrap();
        assert!(bank.is_empty());
    }

    #[test]
    fn test_allocation_failure_propagates() {
        let config = BankConfig::default().with_page_size(MIN_PAGE_SIZE);
        let mut bank = StringBank::with_config(FlakyProvider::new(1, usize::MAX), config).unwrap();

        let first = bank.save(&"a".repeat(4000)).unwrap();
        let err = bank.save(&"b".repeat(200)).unwrap_err();

        assert!(matches!(err, Error::OutOfMemory { size: 4096 }));
        assert_eq!(bank.page_count(), 1);
        assert_eq!(bank.get(first).unwrap(), "a".repeat(4000));
    }

    #[test]
    fn test_partial_close_keeps_remaining_pages() {
        let provider = FlakyProvider::new(usize::MAX, 1);
        let config = BankConfig::default().with_page_size(MIN_PAGE_SIZE);
        let mut bank = StringBank::with_config(provider.clone(), config).unwrap();

        let first = bank.save(&"a".repeat(3000)).unwrap();
        bank.save(&"b".repeat(3000)).unwrap();
        bank.save(&"c".repeat(3000)).unwrap();
        assert_eq!(bank.page_count(), 3);

        // The newest page is released, the next release fails.
        assert!(matches!(bank.close(), Err(Error::Unmap { .. })));
        assert_eq!(provider.released.get(), 1);
        assert_eq!(bank.page_count(), 1);
        assert_eq!(bank.get(first).unwrap(), "a".repeat(3000));

        // The surviving page is current again.
        let next = bank.save("tail").unwrap();
        assert_eq!(next.as_usize(), 3002);
    }

    #[test]
    fn test_failed_release_page_index_is_reused() {
        let provider = FlakyProvider::new(usize::MAX, 1);
        let config = BankConfig::default().with_page_size(MIN_PAGE_SIZE);
        let mut bank = StringBank::with_config(provider, config).unwrap();

        bank.save(&"a".repeat(3000)).unwrap();
        let failed = bank.save(&"b".repeat(3000)).unwrap();
        let released = bank.save(&"c".repeat(3000)).unwrap();
        assert_eq!(bank.page_index(failed), 1);
        assert_eq!(bank.page_index(released), 2);

        // Page 2 is released, page 1 fails and is consumed.
        assert!(bank.close().is_err());
        assert_eq!(bank.page_count(), 1);

        let fresh = bank.save(&"x".repeat(3000)).unwrap();
        assert_eq!(bank.page_index(fresh), 1);
        assert_eq!(bank.offset(fresh), 0);

        // The handle into the failed page now aliases the new record.
        assert_eq!(failed, fresh);
        assert_eq!(bank.get(failed).unwrap(), "x".repeat(3000));
    }

    #[test]
    fn test_page_index_and_offset() {
        let mut bank = small_bank();
        let first = bank.save(&"a".repeat(4000)).unwrap();
        let second = bank.save("hello").unwrap();
        let third = bank.save("world").unwrap();

        assert_eq!((bank.page_index(first), bank.offset(first)), (0, 0));
        assert_eq!((bank.page_index(second), bank.offset(second)), (0, 4002));
        assert_eq!((bank.page_index(third), bank.offset(third)), (1, 0));
        assert_eq!(third.as_usize(), 4096);
    }

    #[test]
    fn test_drop_releases_pages() {
        let provider = FlakyProvider::new(usize::MAX, usize::MAX);
        let config = BankConfig::default().with_page_size(MIN_PAGE_SIZE);
        {
            let mut bank = StringBank::with_config(provider.clone(), config).unwrap();
            for _ in 0..4 {
                bank.save(&"d".repeat(3000)).unwrap();
            }
        }
        assert_eq!(provider.released.get(), 4);
    }

    #[test]
    fn test_with_config_rejects_bad_page_size() {
        let config = BankConfig::default().with_page_size(5000);
        let result = StringBank::with_config(HeapProvider::new(), config);
        assert!(matches!(result, Err(Error::InvalidPageSize(5000))));
    }
}
