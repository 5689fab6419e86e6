//! Lazily bound pass-through stage.

use alloc::rc::Rc;

use super::PassThrough;
use crate::core::{
  Eventloop,
  stage::{Inlet, Outlet, StreamTransformer},
};

#[cfg(test)]
mod tests;

/// Pass-through whose real producer and consumer are wired after construction.
///
/// The forwarder can be handed out as a producer before the actual source is known. A suspend or
/// close requested meanwhile is held and replayed onto the source once it binds, and the source is
/// kept suspended until the outward consumer is bound.
pub struct StreamForwarder<T> {
  transformer: StreamTransformer<T, T>,
}

impl<T: 'static> StreamForwarder<T> {
  /// Creates an unbound forwarder.
  #[must_use]
  pub fn new(eventloop: &Eventloop) -> Self {
    Self { transformer: StreamTransformer::new(eventloop, PassThrough) }
  }

  /// Returns the side the actual producer streams into.
  #[must_use]
  pub fn consumer(&self) -> Rc<Inlet<T>> {
    self.transformer.input()
  }

  /// Returns the side handed to the eventual consumer.
  #[must_use]
  pub fn producer(&self) -> Rc<Outlet<T>> {
    self.transformer.output()
  }
}
