use crate::core::{StreamError, stage::Outlet};

/// Type-erased view of one reducer input, so inputs with different item types share one merge.
pub(crate) trait MergeSlot<K, O, A> {
  /// Folds the buffered head into a fresh accumulator.
  fn reduce_first(&self, output: &Outlet<O>, key: &K) -> Option<A>;

  /// Folds the buffered head into `accumulator`.
  fn reduce_next(&self, output: &Outlet<O>, key: &K, accumulator: &mut A);

  /// Completes a key last touched by this input.
  fn complete(&self, output: &Outlet<O>, key: K, accumulator: A);

  /// Returns the key of the buffered head.
  fn head(&self) -> Option<K>;

  /// Resumes the upstream once the buffer drained far enough.
  fn refill(&self);

  /// Returns `true` once the input received end-of-stream.
  fn is_ended(&self) -> bool;

  fn close(&self);

  fn close_with_error(&self, error: StreamError);
}
