//! One-shot completion notification.

use alloc::{boxed::Box, rc::Rc};
use core::{cell::RefCell, fmt, time::Duration};

use crate::core::{Eventloop, StreamError};

#[cfg(test)]
mod tests;

type CallbackFn = Box<dyn FnOnce(Result<(), StreamError>)>;

/// Single-fire notification of success or failure.
///
/// Consuming `self` on every entry point makes a second resolution impossible.
pub struct CompletionCallback {
  inner: CallbackFn,
}

impl CompletionCallback {
  /// Wraps a closure receiving the outcome.
  #[must_use]
  pub fn new<F>(callback: F) -> Self
  where
    F: FnOnce(Result<(), StreamError>) + 'static, {
    Self { inner: Box::new(callback) }
  }

  /// Callback that ignores the outcome.
  #[must_use]
  pub fn noop() -> Self {
    Self::new(|_| {})
  }

  /// Reports success.
  pub fn on_complete(self) {
    self.complete_with(Ok(()));
  }

  /// Reports failure.
  pub fn on_error(self, error: StreamError) {
    self.complete_with(Err(error));
  }

  /// Reports the provided outcome.
  pub fn complete_with(self, result: Result<(), StreamError>) {
    (self.inner)(result);
  }

  /// Races this callback against a timer on `eventloop`.
  ///
  /// If `timeout` elapses first the callback receives [`StreamError::Timeout`] and the later
  /// outcome is dropped; otherwise the timer is cancelled.
  #[must_use]
  pub fn with_timeout(self, eventloop: &Eventloop, timeout: Duration) -> Self {
    let slot = Rc::new(RefCell::new(Some(self)));
    let timer_slot = slot.clone();
    let timer = eventloop.schedule(timeout, move || {
      let pending = timer_slot.borrow_mut().take();
      if let Some(callback) = pending {
        tracing::debug!(?timeout, "completion timed out");
        callback.on_error(StreamError::Timeout);
      }
    });
    Self::new(move |result| {
      let pending = slot.borrow_mut().take();
      if let Some(callback) = pending {
        timer.cancel();
        callback.complete_with(result);
      }
    })
  }
}

impl fmt::Debug for CompletionCallback {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompletionCallback").finish_non_exhaustive()
  }
}
