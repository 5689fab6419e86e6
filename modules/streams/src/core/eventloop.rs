//! Deterministic single-threaded event loop with a virtual clock.

use alloc::{boxed::Box, collections::{BinaryHeap, VecDeque}, rc::Rc};
use core::{
  cell::{Cell, RefCell},
  cmp::{Ordering, Reverse},
  time::Duration,
};

use super::ScheduledTask;

#[cfg(test)]
mod tests;

type Task = Box<dyn FnOnce()>;

struct TimerEntry {
  deadline: u64,
  sequence: u64,
  handle:   ScheduledTask,
  task:     Task,
}

impl PartialEq for TimerEntry {
  fn eq(&self, other: &Self) -> bool {
    self.deadline == other.deadline && self.sequence == other.sequence
  }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for TimerEntry {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.deadline, self.sequence).cmp(&(other.deadline, other.sequence))
  }
}

struct EventloopInner {
  tasks:    RefCell<VecDeque<Task>>,
  timers:   RefCell<BinaryHeap<Reverse<TimerEntry>>>,
  now:      Cell<u64>,
  sequence: Cell<u64>,
}

/// Cooperative scheduler every stream endpoint runs on.
///
/// Posted tasks run in FIFO order. Timers run on a virtual clock that only advances inside
/// [`Eventloop::run`], so pipelines behave identically on every run.
#[derive(Clone)]
pub struct Eventloop {
  inner: Rc<EventloopInner>,
}

impl Eventloop {
  /// Creates an idle event loop whose clock starts at zero.
  #[must_use]
  pub fn new() -> Self {
    Self {
      inner: Rc::new(EventloopInner {
        tasks:    RefCell::new(VecDeque::new()),
        timers:   RefCell::new(BinaryHeap::new()),
        now:      Cell::new(0),
        sequence: Cell::new(0),
      }),
    }
  }

  /// Enqueues a task to run on a later turn of the loop.
  pub fn post<F>(&self, task: F)
  where
    F: FnOnce() + 'static, {
    self.inner.tasks.borrow_mut().push_back(Box::new(task));
  }

  /// Registers a task to run once `delay` has elapsed on the virtual clock.
  pub fn schedule<F>(&self, delay: Duration, task: F) -> ScheduledTask
  where
    F: FnOnce() + 'static, {
    let delay_millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    let deadline = self.inner.now.get().saturating_add(delay_millis);
    let sequence = self.inner.sequence.get();
    self.inner.sequence.set(sequence.wrapping_add(1));
    let handle = ScheduledTask::new(deadline);
    let entry = TimerEntry { deadline, sequence, handle: handle.clone(), task: Box::new(task) };
    self.inner.timers.borrow_mut().push(Reverse(entry));
    tracing::trace!(deadline, "timer scheduled");
    handle
  }

  /// Returns the current virtual time in milliseconds.
  #[must_use]
  pub fn current_time_millis(&self) -> u64 {
    self.inner.now.get()
  }

  /// Returns the number of posted tasks waiting to run.
  #[must_use]
  pub fn pending_tasks(&self) -> usize {
    self.inner.tasks.borrow().len()
  }

  /// Returns the number of timers that are neither complete nor cancelled.
  #[must_use]
  pub fn pending_timers(&self) -> usize {
    self.inner.timers.borrow().iter().filter(|entry| !entry.0.handle.is_cancelled()).count()
  }

  /// Runs posted tasks until the queue is empty, leaving timers untouched.
  ///
  /// Returns the number of tasks executed.
  pub fn run_until_idle(&self) -> usize {
    let mut executed = 0_usize;
    while let Some(task) = self.next_task() {
      task();
      executed = executed.saturating_add(1);
    }
    executed
  }

  /// Runs tasks and timers until nothing is pending.
  ///
  /// Returns the number of tasks and timers executed.
  pub fn run(&self) -> usize {
    let mut executed = self.run_until_idle();
    while let Some(entry) = self.next_timer() {
      if entry.deadline > self.inner.now.get() {
        self.inner.now.set(entry.deadline);
      }
      entry.handle.mark_complete();
      (entry.task)();
      executed = executed.saturating_add(1).saturating_add(self.run_until_idle());
    }
    executed
  }

  fn next_task(&self) -> Option<Task> {
    self.inner.tasks.borrow_mut().pop_front()
  }

  fn next_timer(&self) -> Option<TimerEntry> {
    let mut timers = self.inner.timers.borrow_mut();
    while let Some(Reverse(entry)) = timers.pop() {
      if !entry.handle.is_cancelled() {
        return Some(entry);
      }
    }
    None
  }
}

impl Default for Eventloop {
  fn default() -> Self {
    Self::new()
  }
}
