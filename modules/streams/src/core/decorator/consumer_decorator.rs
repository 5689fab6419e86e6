//! Consumer wrapper with overridable hooks.

use alloc::rc::Rc;

use super::PassThrough;
use crate::core::{
  Eventloop,
  stage::{ConsumerRef, Inlet, StreamProducer, StreamTransformer, TransformerLogic},
};


/// Wraps an actual consumer behind a stable outward consumer.
pub struct ConsumerDecorator<T> {
  transformer: StreamTransformer<T, T>,
}

impl<T: 'static> ConsumerDecorator<T> {
  /// Decorates `actual` with pass-through behaviour.
  #[must_use]
  pub fn new(eventloop: &Eventloop, actual: ConsumerRef<T>) -> Self {
    Self::with_logic(eventloop, actual, PassThrough)
  }

  /// Decorates `actual`, routing items and end-of-stream through `logic` first.
  #[must_use]
  pub fn with_logic<L>(eventloop: &Eventloop, actual: ConsumerRef<T>, logic: L) -> Self
  where
    L: TransformerLogic<T, T> + 'static, {
    let decorator = Self { transformer: StreamTransformer::new(eventloop, logic) };
    decorator.decorate(actual);
    decorator
  }

  /// Replaces the wrapped consumer.
  ///
  /// # Panics
  ///
  /// Panics when the decorator already terminated.
  pub fn decorate(&self, actual: ConsumerRef<T>) {
    self.transformer.output().stream_to(actual);
  }

  /// Returns the wrapped consumer.
  #[must_use]
  pub fn actual(&self) -> Option<ConsumerRef<T>> {
    self.transformer.output().downstream()
  }

  /// Returns the outward consumer.
  #[must_use]
  pub fn consumer(&self) -> Rc<Inlet<T>> {
    self.transformer.input()
  }
}
