//! Big-endian scalar codec
//!
//! The shared leaf both protocol directions sit on: 2/4/8-byte big-endian
//! integers read from arbitrary, possibly unaligned offsets of a larger
//! buffer, plus the 4-byte length prefixes the command encoder emits. Every
//! function here is pure; callers guarantee bounds.

use byteorder::{BigEndian, ByteOrder};

/// Encode an unsigned 32-bit value as 4 big-endian bytes.
#[inline]
pub fn encode_u32(value: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, value);
    buf
}

/// Read a big-endian u16 at `offset`.
///
/// Caller guarantees `offset + 2 <= buf.len()`.
#[inline]
pub fn read_u16(buf: &[u8], offset: usize) -> u16 {
    BigEndian::read_u16(&buf[offset..offset + 2])
}

/// Read a big-endian i32 at `offset`.
///
/// Caller guarantees `offset + 4 <= buf.len()`.
#[inline]
pub fn read_i32(buf: &[u8], offset: usize) -> i32 {
    BigEndian::read_i32(&buf[offset..offset + 4])
}

/// Read a big-endian i64 at `offset`.
///
/// Caller guarantees `offset + 8 <= buf.len()`.
#[inline]
pub fn read_i64(buf: &[u8], offset: usize) -> i64 {
    BigEndian::read_i64(&buf[offset..offset + 8])
}

/// Append `len` as the 4-byte big-endian prefix every length-prefixed
/// command body uses.
#[inline]
pub fn put_len_prefix(out: &mut Vec<u8>, len: usize) {
    debug_assert!(len <= u32::MAX as usize);
    out.extend_from_slice(&encode_u32(len as u32));
}
