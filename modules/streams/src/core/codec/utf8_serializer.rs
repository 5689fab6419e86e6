use alloc::{format, string::String};

use bytes::{Bytes, BytesMut};

use super::BufferSerializer;
use crate::core::StreamError;


/// UTF-8 string payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Serializer;

impl BufferSerializer<String> for Utf8Serializer {
  fn serialize(&self, item: &String, buffer: &mut BytesMut) {
    buffer.extend_from_slice(item.as_bytes());
  }

  fn deserialize(&self, payload: Bytes) -> Result<String, StreamError> {
    String::from_utf8(payload.to_vec()).map_err(|error| StreamError::MalformedRecord(format!("invalid utf-8: {error}")))
  }
}
