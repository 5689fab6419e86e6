use alloc::format;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::BufferSerializer;
use crate::core::StreamError;

#[cfg(test)]
mod tests;

/// Fixed four-byte big-endian `i32` payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct I32Serializer;

impl BufferSerializer<i32> for I32Serializer {
  fn serialize(&self, item: &i32, buffer: &mut BytesMut) {
    buffer.put_i32(*item);
  }

  fn deserialize(&self, mut payload: Bytes) -> Result<i32, StreamError> {
    if payload.len() != 4 {
      return Err(StreamError::MalformedRecord(format!("expected 4 bytes for an i32, got {}", payload.len())));
    }
    Ok(payload.get_i32())
  }
}
