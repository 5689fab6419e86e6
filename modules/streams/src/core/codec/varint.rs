//! Unsigned LEB128 record length prefixes.

use bytes::{BufMut, BytesMut};

use crate::core::StreamError;

#[cfg(test)]
mod tests;

const MAX_VARINT_LEN: usize = 10;

/// Appends `value` as an unsigned LEB128 varint.
pub(crate) fn put_varint(buffer: &mut BytesMut, mut value: usize) {
  while value >= 0x80 {
    buffer.put_u8((value as u8 & 0x7F) | 0x80);
    value >>= 7;
  }
  buffer.put_u8(value as u8);
}

/// Returns the number of bytes `value` occupies as a varint.
pub(crate) const fn varint_len(mut value: usize) -> usize {
  let mut len = 1;
  while value >= 0x80 {
    value >>= 7;
    len += 1;
  }
  len
}

/// Reads a varint from the start of `bytes`.
///
/// Returns the value and the prefix length, or `None` while the prefix is incomplete.
pub(crate) fn read_varint(bytes: &[u8]) -> Result<Option<(usize, usize)>, StreamError> {
  let mut value: usize = 0;
  for (index, byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
    let shift = index * 7;
    let bits = usize::from(byte & 0x7F);
    if shift >= usize::BITS as usize || (shift > 0 && bits >> (usize::BITS as usize - shift) != 0) {
      return Err(StreamError::MalformedRecord(alloc::string::String::from("record length overflows")));
    }
    value |= bits << shift;
    if byte & 0x80 == 0 {
      return Ok(Some((value, index + 1)));
    }
  }
  if bytes.len() >= MAX_VARINT_LEN {
    return Err(StreamError::MalformedRecord(alloc::string::String::from("record length prefix too long")));
  }
  Ok(None)
}
