use core::time::Duration;

use super::SerializerConfig;
use crate::core::StreamError;

#[test]
fn defaults() {
  let config = SerializerConfig::default();
  assert_eq!(config.buffer_size(), 16 * 1024);
  assert_eq!(config.max_message_size(), (1 << 21) - 1);
  assert_eq!(config.flush_delay(), None);
}

#[test]
fn builder_updates_fields() {
  let config = SerializerConfig::new(14, 100).with_flush_delay(Duration::from_millis(5)).with_max_message_size(64);
  assert_eq!(config.buffer_size(), 14);
  assert_eq!(config.max_message_size(), 64);
  assert_eq!(config.flush_delay(), Some(Duration::from_millis(5)));
}

#[test]
fn zero_sizes_are_rejected() {
  assert!(matches!(
    SerializerConfig::default().with_buffer_size(0).validate(),
    Err(StreamError::InvalidArgument { name: "buffer_size", .. })
  ));
  assert!(matches!(
    SerializerConfig::default().with_max_message_size(0).validate(),
    Err(StreamError::InvalidArgument { name: "max_message_size", .. })
  ));
}
