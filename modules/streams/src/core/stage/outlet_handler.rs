use super::{Outlet, ProduceOutcome};
use crate::core::StreamError;

/// Hooks an [`Outlet`] invokes on its owner.
///
/// Every hook receives the outlet it fires for; multi-output owners tell outlets apart by
/// [`Outlet::port`]. Hooks fire once per transition and never after the outlet reached a final
/// status.
pub trait OutletHandler<T> {
  /// The outlet was bound for the first time and the event loop reached it.
  fn on_started(&self, outlet: &Outlet<T>) {
    let _ = outlet;
  }

  /// Produces the next item for [`Outlet::produce`].
  ///
  /// # Errors
  ///
  /// Returning an error closes the outlet with that error.
  fn do_produce(&self, outlet: &Outlet<T>) -> Result<ProduceOutcome, StreamError> {
    let _ = outlet;
    Ok(ProduceOutcome::Yield)
  }

  /// The consumer suspended the outlet.
  fn on_suspended(&self, outlet: &Outlet<T>) {
    let _ = outlet;
  }

  /// The consumer resumed the outlet.
  fn on_resumed(&self, outlet: &Outlet<T>) {
    let _ = outlet;
  }

  /// The outlet was closed before it sent end-of-stream.
  fn on_closed(&self, outlet: &Outlet<T>) {
    let _ = outlet;
  }

  /// The outlet was closed with an error.
  fn on_closed_with_error(&self, outlet: &Outlet<T>, error: &StreamError) {
    let _ = (outlet, error);
  }
}
