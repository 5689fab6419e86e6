use core::marker::PhantomData;

use super::Reducer;
use crate::core::stage::Outlet;

/// Emits every item as it is merged, so the output is the key-ordered union of all inputs.
pub(crate) struct MergeSortReducer<T> {
  _item: PhantomData<fn(T)>,
}

impl<T> MergeSortReducer<T> {
  pub(crate) const fn new() -> Self {
    Self { _item: PhantomData }
  }
}

impl<K, T: 'static> Reducer<K, T, T, ()> for MergeSortReducer<T> {
  fn on_first_item(&self, output: &Outlet<T>, _key: &K, item: T) {
    output.send(item);
  }

  fn on_next_item(&self, output: &Outlet<T>, _key: &K, item: T, _accumulator: &mut ()) {
    output.send(item);
  }

  fn on_complete(&self, _output: &Outlet<T>, _key: K, _accumulator: ()) {}
}
