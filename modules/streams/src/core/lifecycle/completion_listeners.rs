use alloc::vec::Vec;

use super::CompletionCallback;
use crate::core::StreamError;

/// Completion callbacks of one endpoint, resolved at most once.
pub(crate) struct CompletionListeners {
  pending: Vec<CompletionCallback>,
  outcome: Option<Result<(), StreamError>>,
}

impl CompletionListeners {
  pub(crate) const fn new() -> Self {
    Self { pending: Vec::new(), outcome: None }
  }

  /// Stores `callback`, or hands it back with the outcome when already resolved.
  pub(crate) fn register(
    &mut self,
    callback: CompletionCallback,
  ) -> Option<(CompletionCallback, Result<(), StreamError>)> {
    match &self.outcome {
      | Some(outcome) => Some((callback, outcome.clone())),
      | None => {
        self.pending.push(callback);
        None
      },
    }
  }

  /// Records the outcome and returns the callbacks to notify. Later calls return nothing.
  pub(crate) fn resolve(&mut self, outcome: &Result<(), StreamError>) -> Vec<CompletionCallback> {
    if self.outcome.is_some() {
      return Vec::new();
    }
    self.outcome = Some(outcome.clone());
    core::mem::take(&mut self.pending)
  }

  /// Invokes `callbacks`; call this without holding any endpoint borrow.
  pub(crate) fn notify(callbacks: Vec<CompletionCallback>, outcome: &Result<(), StreamError>) {
    for callback in callbacks {
      callback.complete_with(outcome.clone());
    }
  }
}
