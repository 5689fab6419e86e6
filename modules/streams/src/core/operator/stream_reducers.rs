//! Canned reducers.

use super::{DeduplicateReducer, InputToOutput, MergeSortReducer, Reducer, ReducerToResult};

#[cfg(test)]
mod tests;

/// Namespace for ready-made [`Reducer`]s.
pub struct StreamReducers;

impl StreamReducers {
  /// Emits one item per key: the first one merged.
  #[must_use]
  pub fn merge_deduplicate<K, T: 'static>() -> impl Reducer<K, T, T, T> {
    DeduplicateReducer::new()
  }

  /// Emits every item in key order.
  #[must_use]
  pub fn merge_sort<K, T: 'static>() -> impl Reducer<K, T, T, ()> {
    MergeSortReducer::new()
  }

  /// Emits one accumulated result per key.
  #[must_use]
  pub fn to_accumulator<K, I, O, A, R>(reducer: R) -> InputToOutput<R>
  where
    O: 'static,
    R: ReducerToResult<K, I, O, A>, {
    InputToOutput::new(reducer)
  }
}
