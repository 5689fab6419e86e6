use crate::core::StreamError;

/// What a collecting consumer does after storing an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
  /// Keep receiving.
  Continue,
  /// Suspend the upstream and resume it on the next loop turn.
  Suspend,
  /// End the stream from the consumer side; the upstream ends `Closed`.
  EndOfStream,
  /// Fail the stream with the given error.
  Fail(StreamError),
}
