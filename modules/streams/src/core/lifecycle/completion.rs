use crate::core::StreamError;

/// Polling result for stream completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
  /// The stream has not terminated yet.
  Pending,
  /// The stream terminated with the provided result.
  Ready(Result<T, StreamError>),
}

impl<T> Completion<T> {
  /// Returns `true` once a result is available.
  #[must_use]
  pub const fn is_ready(&self) -> bool {
    matches!(self, Self::Ready(_))
  }

  /// Converts into the result, or `None` while pending.
  #[must_use]
  pub fn into_result(self) -> Option<Result<T, StreamError>> {
    match self {
      | Self::Pending => None,
      | Self::Ready(result) => Some(result),
    }
  }
}
