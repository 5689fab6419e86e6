use core::marker::PhantomData;

use super::Reducer;
use crate::core::stage::Outlet;

/// Keeps the first item of every key.
pub(crate) struct DeduplicateReducer<T> {
  _item: PhantomData<fn(T)>,
}

impl<T> DeduplicateReducer<T> {
  pub(crate) const fn new() -> Self {
    Self { _item: PhantomData }
  }
}

impl<K, T: 'static> Reducer<K, T, T, T> for DeduplicateReducer<T> {
  fn on_first_item(&self, _output: &Outlet<T>, _key: &K, item: T) -> T {
    item
  }

  fn on_next_item(&self, _output: &Outlet<T>, _key: &K, _item: T, _accumulator: &mut T) {}

  fn on_complete(&self, output: &Outlet<T>, _key: K, accumulator: T) {
    output.send(accumulator);
  }
}
