//! Item mapping.

use alloc::rc::Rc;

use crate::core::{
  Eventloop,
  stage::{Inlet, Outlet, StreamTransformer, TransformerLogic},
};


/// Applies a function to every item.
pub struct StreamMap<I, O> {
  transformer: StreamTransformer<I, O>,
}

struct MapLogic<F> {
  mapper: F,
}

impl<I: 'static, O: 'static> StreamMap<I, O> {
  /// Creates a map stage applying `mapper`.
  #[must_use]
  pub fn new<F>(eventloop: &Eventloop, mapper: F) -> Self
  where
    F: Fn(I) -> O + 'static, {
    Self { transformer: StreamTransformer::new(eventloop, MapLogic { mapper }) }
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<I>> {
    self.transformer.input()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<O>> {
    self.transformer.output()
  }
}

impl<I, O, F> TransformerLogic<I, O> for MapLogic<F>
where
  I: 'static,
  O: 'static,
  F: Fn(I) -> O,
{
  fn on_data(&self, output: &Outlet<O>, item: I) {
    output.send((self.mapper)(item));
  }
}
