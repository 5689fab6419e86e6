use alloc::rc::Rc;

use super::{DataReceiver, ProducerRef};
use crate::core::{
  StreamError,
  lifecycle::{CompletionCallback, StreamStatus},
};

/// Shared handle to a consumer endpoint.
pub type ConsumerRef<T> = Rc<dyn StreamConsumer<T>>;

/// Data sink holding a back-reference to its upstream producer.
pub trait StreamConsumer<T> {
  /// Returns the callback the upstream must invoke per item.
  fn data_receiver(&self) -> DataReceiver<T>;

  /// Replaces the upstream producer and returns the previous one.
  fn set_upstream(&self, producer: Option<ProducerRef<T>>) -> Option<ProducerRef<T>>;

  /// Returns the bound producer.
  fn upstream(&self) -> Option<ProducerRef<T>>;

  /// Called by the upstream after its last item.
  fn on_end_of_stream(&self);

  /// Called by the upstream when the link fails. Consumers also call it on themselves to fail.
  fn on_error(&self, error: StreamError);

  /// Returns the current status.
  fn status(&self) -> StreamStatus;

  /// Returns the error, set only when the status is `ClosedWithError`.
  fn error(&self) -> Option<StreamError>;

  /// Registers a callback fired once when the consumer terminates.
  fn add_completion_callback(&self, callback: CompletionCallback);
}
