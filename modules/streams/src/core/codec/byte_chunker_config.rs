use crate::core::{StreamError, validate_positive_argument};


/// Chunk size bounds for [`StreamByteChunker`](super::StreamByteChunker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteChunkerConfig {
  min_chunk_size: usize,
  max_chunk_size: usize,
}

impl ByteChunkerConfig {
  /// Creates a configuration emitting chunks between `min_chunk_size` and `max_chunk_size` bytes.
  #[must_use]
  pub const fn new(min_chunk_size: usize, max_chunk_size: usize) -> Self {
    Self { min_chunk_size, max_chunk_size }
  }

  /// Returns the smallest chunk emitted before end-of-stream.
  #[must_use]
  pub const fn min_chunk_size(&self) -> usize {
    self.min_chunk_size
  }

  /// Returns the largest chunk emitted.
  #[must_use]
  pub const fn max_chunk_size(&self) -> usize {
    self.max_chunk_size
  }

  /// Updates the lower bound.
  #[must_use]
  pub const fn with_min_chunk_size(mut self, min_chunk_size: usize) -> Self {
    self.min_chunk_size = min_chunk_size;
    self
  }

  /// Updates the upper bound.
  #[must_use]
  pub const fn with_max_chunk_size(mut self, max_chunk_size: usize) -> Self {
    self.max_chunk_size = max_chunk_size;
    self
  }

  /// Checks the bounds.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the minimum is zero or above the maximum.
  pub fn validate(&self) -> Result<(), StreamError> {
    validate_positive_argument("min_chunk_size", self.min_chunk_size)?;
    if self.max_chunk_size < self.min_chunk_size {
      return Err(StreamError::InvalidArgument {
        name:   "max_chunk_size",
        value:  self.max_chunk_size,
        reason: "must not be smaller than min_chunk_size",
      });
    }
    Ok(())
  }
}

impl Default for ByteChunkerConfig {
  fn default() -> Self {
    Self { min_chunk_size: 8 * 1024, max_chunk_size: 16 * 1024 }
  }
}
