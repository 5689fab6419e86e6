use alloc::rc::Rc;
use core::fmt;

/// Entry point through which a producer pushes items into its consumer.
pub struct DataReceiver<T> {
  inner: Rc<dyn Fn(T)>,
}

impl<T> DataReceiver<T> {
  /// Wraps a per-item callback.
  #[must_use]
  pub fn new<F>(receiver: F) -> Self
  where
    F: Fn(T) + 'static, {
    Self { inner: Rc::new(receiver) }
  }

  /// Delivers one item.
  pub fn on_data(&self, item: T) {
    (self.inner)(item);
  }
}

impl<T> Clone for DataReceiver<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> fmt::Debug for DataReceiver<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DataReceiver").finish_non_exhaustive()
  }
}
