use alloc::rc::Rc;

use super::ConsumerRef;
use crate::core::{
  StreamError,
  lifecycle::{CompletionCallback, StreamStatus},
};

/// Shared handle to a producer endpoint.
pub type ProducerRef<T> = Rc<dyn StreamProducer<T>>;

/// Data source bound to at most one downstream consumer.
///
/// All methods take `&self`: endpoints call back into each other re-entrantly on the event-loop
/// thread, so implementations keep their state in cells and never hold a borrow across a call to
/// their partner.
pub trait StreamProducer<T> {
  /// Binds this producer to `consumer` and starts streaming on a later loop turn.
  ///
  /// The previous consumer of this producer loses its upstream and the previous producer of
  /// `consumer` loses its downstream. Binding the pair that is already bound does nothing.
  ///
  /// # Panics
  ///
  /// Panics when the producer already reached `Closed` or `ClosedWithError`.
  fn stream_to(&self, consumer: ConsumerRef<T>);

  /// Re-fetches the data receiver from the current downstream.
  fn bind_data_receiver(&self);

  /// Returns the bound consumer.
  fn downstream(&self) -> Option<ConsumerRef<T>>;

  /// Forgets the bound consumer without changing status.
  fn release_downstream(&self);

  /// Asks the producer to stop pushing after the current item.
  fn suspend(&self);

  /// Asks a suspended producer to continue.
  fn resume(&self);

  /// Terminates the link without an error.
  fn close(&self);

  /// Terminates the link with `error`.
  fn close_with_error(&self, error: StreamError);

  /// Returns the current status.
  fn status(&self) -> StreamStatus;

  /// Returns the error, set only when the status is `ClosedWithError`.
  fn error(&self) -> Option<StreamError>;

  /// Registers a callback fired once when the producer terminates.
  fn add_completion_callback(&self, callback: CompletionCallback);
}
