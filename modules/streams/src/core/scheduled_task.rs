//! Handle for a timer registered on the event loop.

use alloc::rc::Rc;
use core::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
  Pending,
  Cancelled,
  Complete,
}

/// Handle returned by [`Eventloop::schedule`](super::Eventloop::schedule).
#[derive(Debug, Clone)]
pub struct ScheduledTask {
  deadline: u64,
  state:    Rc<Cell<TimerState>>,
}

impl ScheduledTask {
  pub(crate) fn new(deadline: u64) -> Self {
    Self { deadline, state: Rc::new(Cell::new(TimerState::Pending)) }
  }

  /// Returns the virtual time in milliseconds at which the task fires.
  #[must_use]
  pub const fn deadline_millis(&self) -> u64 {
    self.deadline
  }

  /// Cancels the task. Returns `false` when it already ran or was cancelled.
  pub fn cancel(&self) -> bool {
    if self.state.get() != TimerState::Pending {
      return false;
    }
    self.state.set(TimerState::Cancelled);
    true
  }

  /// Returns `true` once the task has been cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.state.get() == TimerState::Cancelled
  }

  /// Returns `true` once the task has run.
  #[must_use]
  pub fn is_complete(&self) -> bool {
    self.state.get() == TimerState::Complete
  }

  pub(crate) fn mark_complete(&self) {
    self.state.set(TimerState::Complete);
  }
}
