use super::{Reducer, ReducerToResult};
use crate::core::stage::Outlet;

/// Adapts a [`ReducerToResult`] into a [`Reducer`] emitting one result per key.
pub struct InputToOutput<R> {
  inner: R,
}

impl<R> InputToOutput<R> {
  /// Wraps `inner`.
  #[must_use]
  pub const fn new(inner: R) -> Self {
    Self { inner }
  }
}

impl<K, I, O, A, R> Reducer<K, I, O, A> for InputToOutput<R>
where
  O: 'static,
  R: ReducerToResult<K, I, O, A>,
{
  fn on_first_item(&self, _output: &Outlet<O>, key: &K, item: I) -> A {
    let mut accumulator = self.inner.create_accumulator(key);
    self.inner.accumulate(&mut accumulator, item);
    accumulator
  }

  fn on_next_item(&self, _output: &Outlet<O>, _key: &K, item: I, accumulator: &mut A) {
    self.inner.accumulate(accumulator, item);
  }

  fn on_complete(&self, output: &Outlet<O>, _key: K, accumulator: A) {
    output.send(self.inner.produce_result(accumulator));
  }
}
