use crate::core::{StreamError, validate_positive_argument};


/// Buffering configuration for the multi-input merge reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReducerConfig {
  buffer_size: usize,
}

impl ReducerConfig {
  /// Creates a configuration buffering up to `buffer_size` items per input.
  #[must_use]
  pub const fn new(buffer_size: usize) -> Self {
    Self { buffer_size }
  }

  /// Returns the per-input buffer size.
  #[must_use]
  pub const fn buffer_size(&self) -> usize {
    self.buffer_size
  }

  /// Updates the per-input buffer size.
  #[must_use]
  pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
    self.buffer_size = buffer_size;
    self
  }

  /// Returns the buffered length at or below which a suspended input is resumed.
  #[must_use]
  pub const fn resume_threshold(&self) -> usize {
    self.buffer_size / 2
  }

  /// Checks the configuration.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the buffer size is zero.
  pub fn validate(&self) -> Result<(), StreamError> {
    validate_positive_argument("buffer_size", self.buffer_size)?;
    Ok(())
  }
}

impl Default for ReducerConfig {
  fn default() -> Self {
    Self { buffer_size: 256 }
  }
}
