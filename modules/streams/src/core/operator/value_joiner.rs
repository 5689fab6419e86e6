/// Builds output rows for [`StreamJoin`](super::StreamJoin).
///
/// Returning `None` drops the row.
pub trait ValueJoiner<K, L, R, V> {
  /// Joins a left item with the right item sharing its key.
  fn inner_join(&self, key: &K, left: L, right: &R) -> Option<V>;

  /// Handles a left item without a matching right item.
  fn left_join(&self, key: &K, left: L) -> Option<V>;
}
