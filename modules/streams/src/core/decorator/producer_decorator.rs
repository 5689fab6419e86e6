//! Producer wrapper with overridable hooks.

use alloc::rc::Rc;

use super::PassThrough;
use crate::core::{
  Eventloop,
  stage::{Outlet, ProducerRef, StreamConsumer, StreamTransformer, TransformerLogic},
};

#[cfg(test)]
mod tests;

/// Wraps an actual producer behind a stable outward producer.
///
/// Items and end-of-stream of the actual producer go through a [`TransformerLogic`], which lets
/// callers re-map selected events (for example turn end-of-stream into "fetch the next segment")
/// without re-implementing the producer contract.
pub struct ProducerDecorator<T> {
  transformer: StreamTransformer<T, T>,
}

impl<T: 'static> ProducerDecorator<T> {
  /// Decorates `actual` with pass-through behaviour.
  #[must_use]
  pub fn new(eventloop: &Eventloop, actual: ProducerRef<T>) -> Self {
    Self::with_logic(eventloop, actual, PassThrough)
  }

  /// Decorates `actual` with custom item and end-of-stream handling.
  #[must_use]
  pub fn with_logic<L>(eventloop: &Eventloop, actual: ProducerRef<T>, logic: L) -> Self
  where
    L: TransformerLogic<T, T> + 'static, {
    let decorator = Self { transformer: StreamTransformer::new(eventloop, logic) };
    decorator.decorate(actual);
    decorator
  }

  /// Replaces the wrapped producer.
  pub fn decorate(&self, actual: ProducerRef<T>) {
    actual.stream_to(self.transformer.input());
  }

  /// Returns the wrapped producer.
  #[must_use]
  pub fn actual(&self) -> Option<ProducerRef<T>> {
    self.transformer.input().upstream()
  }

  /// Returns the outward producer.
  #[must_use]
  pub fn producer(&self) -> Rc<Outlet<T>> {
    self.transformer.output()
  }
}
