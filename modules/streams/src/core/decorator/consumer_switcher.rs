//! Consumer whose wrapped sink can be replaced while bound.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use crate::core::{
  Eventloop, StreamError,
  lifecycle::StreamStatus,
  stage::{ConsumerRef, Inlet, InletHandler, Outlet, OutletHandler, StreamConsumer, StreamProducer},
};


/// Outward consumer that forwards into whichever sink is current.
///
/// The upstream stays suspended until the first sink is set. Switching sends end-of-stream to the
/// previous sink unless it already terminated, so each sink sees a complete stream of its own. A
/// switch requested while an item is being delivered suspends the upstream and is applied on the
/// next loop turn.
pub struct ConsumerSwitcher<T> {
  input: Rc<Inlet<T>>,
  core:  Rc<SwitcherCore<T>>,
}

struct SwitcherCore<T> {
  this:       Weak<SwitcherCore<T>>,
  eventloop:  Eventloop,
  input:      Weak<Inlet<T>>,
  current:    RefCell<Option<Rc<Outlet<T>>>>,
  generation: Cell<usize>,
  delivering: Cell<bool>,
}

impl<T: 'static> ConsumerSwitcher<T> {
  /// Creates a switcher without a sink.
  #[must_use]
  pub fn new(eventloop: &Eventloop) -> Self {
    let input = Inlet::new(eventloop, 0);
    let core = Rc::new_cyclic(|this| SwitcherCore {
      this:       this.clone(),
      eventloop:  eventloop.clone(),
      input:      Rc::downgrade(&input),
      current:    RefCell::new(None),
      generation: Cell::new(0),
      delivering: Cell::new(false),
    });
    input.set_handler(core.clone());
    input.suspend_upstream();
    Self { input, core }
  }

  /// Makes `consumer` the current sink.
  pub fn switch_to(&self, consumer: ConsumerRef<T>) {
    self.core.switch_to(consumer);
  }

  /// Returns the current sink.
  #[must_use]
  pub fn current(&self) -> Option<ConsumerRef<T>> {
    self.core.current().and_then(|outlet| outlet.downstream())
  }

  /// Returns the outward consumer.
  #[must_use]
  pub fn consumer(&self) -> Rc<Inlet<T>> {
    self.input.clone()
  }
}

impl<T: 'static> SwitcherCore<T> {
  fn switch_to(&self, consumer: ConsumerRef<T>) {
    if self.delivering.get() {
      if let Some(input) = self.input.upgrade() {
        input.suspend_upstream();
      }
      if let Some(this) = self.this.upgrade() {
        self.eventloop.post(move || this.switch_to(consumer));
      }
      return;
    }
    let (Some(this), Some(input)) = (self.this.upgrade(), self.input.upgrade()) else {
      return;
    };
    let generation = self.generation.get().wrapping_add(1);
    self.generation.set(generation);
    let outlet = Outlet::with_handler(&self.eventloop, generation, this);
    let previous = self.current.replace(Some(outlet.clone()));
    if let Some(previous) = previous.filter(|previous| previous.status().is_active()) {
      previous.send_end_of_stream();
    }
    tracing::trace!(generation, "consumer switched");
    outlet.stream_to(consumer);
    match input.status() {
      | StreamStatus::Ready | StreamStatus::Suspended => {
        if outlet.is_ready() {
          input.resume_upstream();
        }
      },
      | StreamStatus::EndOfStream | StreamStatus::Closed => outlet.send_end_of_stream(),
      | StreamStatus::ClosedWithError => outlet.close_with_error(input.error().unwrap_or(StreamError::Cancelled)),
    }
  }

  fn current(&self) -> Option<Rc<Outlet<T>>> {
    self.current.borrow().clone()
  }

  fn current_for(&self, outlet: &Outlet<T>) -> Option<Rc<Inlet<T>>> {
    if outlet.port() == self.generation.get() {
      self.input.upgrade()
    } else {
      None
    }
  }
}

impl<T: 'static> InletHandler<T> for SwitcherCore<T> {
  fn on_data(&self, _inlet: &Inlet<T>, item: T) {
    match self.current().filter(|current| current.status().is_active()) {
      | Some(current) => {
        self.delivering.set(true);
        current.send(item);
        self.delivering.set(false);
      },
      | None => tracing::warn!("item dropped by consumer switcher without an active sink"),
    }
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<T>) {
    if let Some(current) = self.current().filter(|current| current.status().is_active()) {
      current.send_end_of_stream();
    }
  }

  fn on_error(&self, _inlet: &Inlet<T>, error: &StreamError) {
    if let Some(current) = self.current() {
      current.close_with_error(error.clone());
    }
  }
}

impl<T: 'static> OutletHandler<T> for SwitcherCore<T> {
  fn on_suspended(&self, outlet: &Outlet<T>) {
    if let Some(input) = self.current_for(outlet) {
      input.suspend_upstream();
    }
  }

  fn on_resumed(&self, outlet: &Outlet<T>) {
    if let Some(input) = self.current_for(outlet) {
      input.resume_upstream();
    }
  }

  fn on_closed(&self, outlet: &Outlet<T>) {
    if let Some(input) = self.current_for(outlet) {
      input.close_upstream();
    }
  }

  fn on_closed_with_error(&self, outlet: &Outlet<T>, error: &StreamError) {
    if let Some(input) = self.current_for(outlet) {
      input.close_upstream_with_error(error.clone());
    }
  }
}
