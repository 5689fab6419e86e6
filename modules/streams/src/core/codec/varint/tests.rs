use bytes::BytesMut;

use super::{put_varint, read_varint, varint_len};
use crate::core::StreamError;

#[test]
fn small_values_take_one_byte() {
  let mut buffer = BytesMut::new();
  put_varint(&mut buffer, 4);
  assert_eq!(&buffer[..], &[4]);
  assert_eq!(varint_len(127), 1);
}

#[test]
fn larger_values_continue_in_low_group_order() {
  let mut buffer = BytesMut::new();
  put_varint(&mut buffer, 300);
  assert_eq!(&buffer[..], &[0xAC, 0x02]);
  assert_eq!(varint_len(300), 2);
  assert_eq!(read_varint(&buffer), Ok(Some((300, 2))));
}

#[test]
fn incomplete_prefix_reads_nothing() {
  assert_eq!(read_varint(&[0x80, 0x80]), Ok(None));
  assert_eq!(read_varint(&[]), Ok(None));
}

#[test]
fn overlong_prefix_is_malformed() {
  let bytes = [0xFF_u8; 11];
  assert!(matches!(read_varint(&bytes), Err(StreamError::MalformedRecord(_))));
}
