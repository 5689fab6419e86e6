//! Predicate filter.

use alloc::rc::Rc;

use crate::core::{
  Eventloop,
  stage::{Inlet, Outlet, StreamTransformer, TransformerLogic},
};

#[cfg(test)]
mod tests;

/// Forwards only the items matching a predicate.
pub struct StreamFilter<T> {
  transformer: StreamTransformer<T, T>,
}

struct FilterLogic<P> {
  predicate: P,
}

impl<T: 'static> StreamFilter<T> {
  /// Creates a filter keeping items for which `predicate` returns `true`.
  #[must_use]
  pub fn new<P>(eventloop: &Eventloop, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + 'static, {
    Self { transformer: StreamTransformer::new(eventloop, FilterLogic { predicate }) }
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<T>> {
    self.transformer.input()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<T>> {
    self.transformer.output()
  }
}

impl<T, P> TransformerLogic<T, T> for FilterLogic<P>
where
  T: 'static,
  P: Fn(&T) -> bool,
{
  fn on_data(&self, output: &Outlet<T>, item: T) {
    if (self.predicate)(&item) {
      output.send(item);
    }
  }
}
