use bytes::{Bytes, BytesMut};

use crate::core::StreamError;

/// Encodes items into record payloads and decodes them back.
///
/// Framing is not the serializer's concern: the stream stages add and strip the length prefix.
pub trait BufferSerializer<T> {
  /// Appends the payload of `item` to `buffer`.
  fn serialize(&self, item: &T, buffer: &mut BytesMut);

  /// Decodes one complete payload.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::MalformedRecord`] when the payload does not encode an item.
  fn deserialize(&self, payload: Bytes) -> Result<T, StreamError>;
}
