use bytes::{Bytes, BytesMut};

use super::I32Serializer;
use crate::core::{StreamError, codec::BufferSerializer};

#[test]
fn writes_big_endian() {
  let mut buffer = BytesMut::new();
  I32Serializer.serialize(&10, &mut buffer);
  I32Serializer.serialize(&-2, &mut buffer);
  assert_eq!(&buffer[..], &[0, 0, 0, 10, 0xFF, 0xFF, 0xFF, 0xFE]);
}

#[test]
fn rejects_short_payloads() {
  let result = I32Serializer.deserialize(Bytes::from_static(&[1, 2]));
  assert!(matches!(result, Err(StreamError::MalformedRecord(_))));
}
