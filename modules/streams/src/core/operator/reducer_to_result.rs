/// Accumulator-based reduction with a single result per key.
///
/// Unlike [`Reducer`](super::Reducer) it never sees the output; [`InputToOutput`](super::InputToOutput)
/// adapts it for the merge reducers and [`StreamMemoryReducer`](super::StreamMemoryReducer) uses it
/// directly.
pub trait ReducerToResult<K, I, O, A> {
  /// Creates an empty accumulator for `key`.
  fn create_accumulator(&self, key: &K) -> A;

  /// Folds `item` into `accumulator`.
  fn accumulate(&self, accumulator: &mut A, item: I);

  /// Turns a finished accumulator into the emitted result.
  fn produce_result(&self, accumulator: A) -> O;
}
