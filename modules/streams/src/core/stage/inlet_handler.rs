use super::Inlet;
use crate::core::StreamError;

/// Hooks an [`Inlet`] invokes on its owner for upstream events.
pub trait InletHandler<T> {
  /// A producer was bound to the inlet.
  fn on_upstream_bound(&self, inlet: &Inlet<T>) {
    let _ = inlet;
  }

  /// One item arrived.
  fn on_data(&self, inlet: &Inlet<T>, item: T);

  /// The upstream sent end-of-stream. The inlet acknowledges it once this hook returns.
  fn on_end_of_stream(&self, inlet: &Inlet<T>) {
    let _ = inlet;
  }

  /// The link failed, either upstream or through [`StreamConsumer::on_error`](super::StreamConsumer::on_error).
  fn on_error(&self, inlet: &Inlet<T>, error: &StreamError) {
    let _ = (inlet, error);
  }
}
