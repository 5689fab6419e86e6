use core::time::Duration;

use crate::core::{StreamError, validate_positive_argument};

#[cfg(test)]
mod tests;

/// Buffering and framing limits for the binary serializer and deserializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
  buffer_size:      usize,
  max_message_size: usize,
  flush_delay:      Option<Duration>,
}

impl SerializerConfig {
  /// Largest record a three-byte length prefix can describe.
  pub const MAX_MESSAGE_SIZE: usize = (1 << 21) - 1;

  /// Creates a configuration.
  #[must_use]
  pub const fn new(buffer_size: usize, max_message_size: usize) -> Self {
    Self { buffer_size, max_message_size, flush_delay: None }
  }

  /// Returns the buffered length that triggers a flush.
  #[must_use]
  pub const fn buffer_size(&self) -> usize {
    self.buffer_size
  }

  /// Returns the largest accepted record payload.
  #[must_use]
  pub const fn max_message_size(&self) -> usize {
    self.max_message_size
  }

  /// Returns the delay after which a partially filled buffer is flushed.
  #[must_use]
  pub const fn flush_delay(&self) -> Option<Duration> {
    self.flush_delay
  }

  /// Updates the flush threshold.
  #[must_use]
  pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
    self.buffer_size = buffer_size;
    self
  }

  /// Updates the record limit.
  #[must_use]
  pub const fn with_max_message_size(mut self, max_message_size: usize) -> Self {
    self.max_message_size = max_message_size;
    self
  }

  /// Enables timed flushing.
  #[must_use]
  pub const fn with_flush_delay(mut self, flush_delay: Duration) -> Self {
    self.flush_delay = Some(flush_delay);
    self
  }

  /// Checks the configuration.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when a size is zero.
  pub fn validate(&self) -> Result<(), StreamError> {
    validate_positive_argument("buffer_size", self.buffer_size)?;
    validate_positive_argument("max_message_size", self.max_message_size)?;
    Ok(())
  }
}

impl Default for SerializerConfig {
  fn default() -> Self {
    Self { buffer_size: 16 * 1024, max_message_size: Self::MAX_MESSAGE_SIZE, flush_delay: None }
  }
}
