use alloc::rc::Rc;
use core::cell::RefCell;

use super::Completion;
use crate::core::StreamError;

#[cfg(test)]
mod tests;

struct CompletionSlot<T> {
  result:   Option<Result<T, StreamError>>,
  resolved: bool,
}

/// Handle used to observe the result a collecting stage produces.
///
/// Only the first resolution is recorded. Taking the result does not reopen the handle.
pub struct StreamCompletion<T> {
  inner: Rc<RefCell<CompletionSlot<T>>>,
}

impl<T> Clone for StreamCompletion<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> StreamCompletion<T> {
  /// Creates a pending completion handle.
  #[must_use]
  pub fn new() -> Self {
    Self { inner: Rc::new(RefCell::new(CompletionSlot { result: None, resolved: false })) }
  }

  /// Polls the completion state.
  #[must_use]
  pub fn poll(&self) -> Completion<T>
  where
    T: Clone, {
    match self.inner.borrow().result.clone() {
      | Some(result) => Completion::Ready(result),
      | None => Completion::Pending,
    }
  }

  /// Returns `true` once a result has been recorded and not yet taken.
  #[must_use]
  pub fn is_ready(&self) -> bool {
    self.inner.borrow().result.is_some()
  }

  /// Attempts to take the completion result.
  #[must_use]
  pub fn try_take(&self) -> Option<Result<T, StreamError>> {
    self.inner.borrow_mut().result.take()
  }

  /// Records `result` unless the handle was already resolved.
  pub(crate) fn complete(&self, result: Result<T, StreamError>) {
    let mut slot = self.inner.borrow_mut();
    if !slot.resolved {
      slot.resolved = true;
      slot.result = Some(result);
    }
  }
}

impl<T> Default for StreamCompletion<T> {
  fn default() -> Self {
    Self::new()
  }
}
