//! Compact length prefix codec.
//!
//! Lengths are written as little-endian base-128 groups: seven data bits per
//! byte, least significant group first. Every byte except the last has its
//! high bit set to signal that more bytes follow.
//!
//! ```text
//!   127  ->  7F
//!   128  ->  80 01
//!   300  ->  AC 02
//! 16384  ->  80 80 01
//! ```
//!
//! Most saved strings are shorter than 128 bytes, so the common prefix is a
//! single byte. Larger values simply take more groups; there is no fixed
//! ceiling below `u64::MAX`.
//!
//! The codec is independent of the bank and can be used as a general varint
//! format.
//!
//! # Examples
//!
//! ```
//! use stringbank::codec;
//!
//! let mut buf = [0u8; codec::MAX_WIDTH];
//! let written = codec::encode(300, &mut buf);
//!
//! assert_eq!(&buf[..written], &[0xAC, 0x02]);
//! assert_eq!(codec::decode(&buf).unwrap(), (300, 2));
//! ```

use crate::error::{Error, Result};

/// Widest possible encoding, reached by values of 64 significant bits.
pub const MAX_WIDTH: usize = 10;

const CONTINUATION: u8 = 0x80;
const GROUP_MASK: u64 = 0x7F;

/// Returns the number of bytes needed to encode `n`.
///
/// Zero still costs one byte.
///
/// # Examples
///
/// ```
/// use stringbank::codec::encoded_width;
///
/// assert_eq!(encoded_width(0), 1);
/// assert_eq!(encoded_width(127), 1);
/// assert_eq!(encoded_width(128), 2);
/// ```
#[must_use]
#[inline(always)]
pub const fn encoded_width(n: u64) -> usize {
    let bits = (u64::BITS - n.leading_zeros()) as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}

/// Writes `n` into the start of `buf` and returns the number of bytes written.
///
/// The count always equals [`encoded_width`]`(n)`.
///
/// # Panics
///
/// Panics if `buf` is shorter than [`encoded_width`]`(n)`.
#[inline]
pub fn encode(n: u64, buf: &mut [u8]) -> usize {
    let mut remainder = n;
    let mut i = 0;
    loop {
        let group = (remainder & GROUP_MASK) as u8;
        remainder >>= 7;
        if remainder == 0 {
            buf[i] = group;
            return i + 1;
        }
        buf[i] = group | CONTINUATION;
        i += 1;
    }
}

/// Appends the encoding of `n` to `out`.
pub fn encode_to_vec(n: u64, out: &mut Vec<u8>) -> usize {
    let mut buf = [0u8; MAX_WIDTH];
    let written = encode(n, &mut buf);
    out.extend_from_slice(&buf[..written]);
    written
}

/// Reads a value from the start of `buf`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// - [`Error::TruncatedPrefix`] if `buf` ends before a byte with the high
///   bit clear.
/// - [`Error::PrefixOverflow`] if more than [`MAX_WIDTH`] groups are present
///   or the last group carries bits beyond 64.
#[inline]
pub fn decode(buf: &[u8]) -> Result<(u64, usize)> {
    match buf.first() {
        Some(&b) if b & CONTINUATION == 0 => return Ok((u64::from(b), 1)),
        Some(_) => {}
        None => return Err(Error::TruncatedPrefix),
    }

    let mut total = 0u64;
    for (i, &b) in buf.iter().enumerate() {
        if i == MAX_WIDTH {
            return Err(Error::PrefixOverflow);
        }
        let group = u64::from(b) & GROUP_MASK;
        let shift = 7 * i as u32;
        // The tenth group has room for a single bit.
        if i == MAX_WIDTH - 1 && group > 1 {
            return Err(Error::PrefixOverflow);
        }
        total |= group << shift;
        if b & CONTINUATION == 0 {
            return Ok((total, i + 1));
        }
    }
    Err(Error::TruncatedPrefix)
}
