//! Stream error definitions.

use alloc::string::String;

use super::SharedError;


/// Errors carried by a stream that closes with an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
  /// Generic failure reported by a stage or a caller.
  #[error("stream failed: {0}")]
  Failed(String),
  /// The downstream side closed the stream before it finished.
  #[error("stream cancelled by downstream")]
  Cancelled,
  /// A completion deadline passed first.
  #[error("operation timed out")]
  Timeout,
  /// A record exceeds the configured frame limit.
  #[error("record of {size} bytes exceeds the limit of {limit} bytes")]
  RecordTooLarge {
    /// Size of the offending record.
    size:  usize,
    /// Configured limit.
    limit: usize,
  },
  /// The byte stream ended in the middle of a record.
  #[error("stream ended with {remaining} bytes of an incomplete record")]
  TruncatedRecord {
    /// Bytes buffered when the stream ended.
    remaining: usize,
  },
  /// A record payload could not be decoded.
  #[error("malformed record: {0}")]
  MalformedRecord(String),
  /// A configuration argument is out of range.
  #[error("invalid argument `{name}` ({value}): {reason}")]
  InvalidArgument {
    /// Argument name.
    name:   &'static str,
    /// Rejected value.
    value:  usize,
    /// Why the value was rejected.
    reason: &'static str,
  },
  /// Error raised outside the stream core, carried opaquely.
  #[error("{0}")]
  External(SharedError),
}

impl StreamError {
  /// Creates a [`StreamError::Failed`] from a message.
  #[must_use]
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed(message.into())
  }

  /// Wraps a foreign error without interpreting it.
  #[must_use]
  pub fn external<E>(error: E) -> Self
  where
    E: core::error::Error + 'static, {
    Self::External(SharedError::new(error))
  }
}
