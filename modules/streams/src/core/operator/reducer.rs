use crate::core::stage::Outlet;

/// Per-key reduction hooks used by the merge reducers.
///
/// `A` is the accumulator shared by every input contributing to a key. Hooks emit results by
/// sending into `output`.
pub trait Reducer<K, I, O, A> {
  /// Starts a new key with its first item and returns the accumulator.
  fn on_first_item(&self, output: &Outlet<O>, key: &K, item: I) -> A;

  /// Folds another item of the same key into `accumulator`.
  fn on_next_item(&self, output: &Outlet<O>, key: &K, item: I, accumulator: &mut A);

  /// Called once no input has items left for `key`.
  fn on_complete(&self, output: &Outlet<O>, key: K, accumulator: A);
}
