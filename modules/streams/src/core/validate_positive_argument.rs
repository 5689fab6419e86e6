use super::StreamError;

/// Validates that the provided argument is greater than zero.
///
/// # Errors
///
/// Returns [`StreamError::InvalidArgument`] when `value == 0`.
pub const fn validate_positive_argument(name: &'static str, value: usize) -> Result<usize, StreamError> {
  if value == 0 {
    return Err(StreamError::InvalidArgument { name, value, reason: "must be greater than zero" });
  }
  Ok(value)
}
