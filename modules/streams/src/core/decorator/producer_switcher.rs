//! Producer whose wrapped source can be replaced while bound.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use crate::core::{
  Eventloop, StreamError,
  lifecycle::StreamStatus,
  stage::{Inlet, InletHandler, Outlet, OutletHandler, ProducerRef, StreamConsumer, StreamProducer},
};


/// Outward producer that forwards whichever source is current.
///
/// [`ProducerSwitcher::switch_to`] closes the previous source unless it already terminated, and the
/// new source inherits the outward suspension. Switches requested before the outward producer
/// started are applied when it starts; a switch requested while an item is being delivered is
/// applied on the next loop turn.
pub struct ProducerSwitcher<T> {
  output: Rc<Outlet<T>>,
  core:   Rc<SwitcherCore<T>>,
}

struct SwitcherCore<T> {
  this:       Weak<SwitcherCore<T>>,
  eventloop:  Eventloop,
  output:     Weak<Outlet<T>>,
  current:    RefCell<Option<Rc<Inlet<T>>>>,
  pending:    RefCell<Option<ProducerRef<T>>>,
  started:    Cell<bool>,
  generation: Cell<usize>,
  delivering: Cell<bool>,
}

impl<T: 'static> ProducerSwitcher<T> {
  /// Creates a switcher without a source.
  #[must_use]
  pub fn new(eventloop: &Eventloop) -> Self {
    let output = Outlet::new(eventloop, 0);
    let core = Rc::new_cyclic(|this| SwitcherCore {
      this:       this.clone(),
      eventloop:  eventloop.clone(),
      output:     Rc::downgrade(&output),
      current:    RefCell::new(None),
      pending:    RefCell::new(None),
      started:    Cell::new(false),
      generation: Cell::new(0),
      delivering: Cell::new(false),
    });
    output.set_handler(core.clone());
    Self { output, core }
  }

  /// Makes `producer` the current source.
  pub fn switch_to(&self, producer: ProducerRef<T>) {
    self.core.switch_to(producer);
  }

  /// Returns the current source.
  #[must_use]
  pub fn current(&self) -> Option<ProducerRef<T>> {
    let current = self.core.current.borrow().clone();
    current.and_then(|inlet| inlet.upstream())
  }

  /// Returns the outward producer.
  #[must_use]
  pub fn producer(&self) -> Rc<Outlet<T>> {
    self.output.clone()
  }
}

impl<T: 'static> SwitcherCore<T> {
  fn switch_to(&self, producer: ProducerRef<T>) {
    if self.delivering.get() {
      if let Some(this) = self.this.upgrade() {
        self.eventloop.post(move || this.switch_to(producer));
      }
      return;
    }
    if !self.started.get() {
      let replaced = self.pending.replace(Some(producer));
      if let Some(replaced) = replaced {
        replaced.close();
      }
      return;
    }
    self.apply(producer);
  }

  fn apply(&self, producer: ProducerRef<T>) {
    let (Some(this), Some(output)) = (self.this.upgrade(), self.output.upgrade()) else {
      producer.close();
      return;
    };
    let generation = self.generation.get().wrapping_add(1);
    self.generation.set(generation);
    let inlet = Inlet::with_handler(&self.eventloop, generation, this);
    let previous = self.current.replace(Some(inlet.clone()));
    if let Some(previous) = previous {
      previous.close_upstream();
    }
    match output.status() {
      | StreamStatus::Ready => {},
      | StreamStatus::Suspended => inlet.suspend_upstream(),
      | StreamStatus::EndOfStream | StreamStatus::Closed => inlet.close_upstream(),
      | StreamStatus::ClosedWithError => {
        inlet.close_upstream_with_error(output.error().unwrap_or(StreamError::Cancelled));
      },
    }
    tracing::trace!(generation, "producer switched");
    producer.stream_to(inlet);
  }

  fn current(&self) -> Option<Rc<Inlet<T>>> {
    self.current.borrow().clone()
  }

  fn is_current(&self, inlet: &Inlet<T>) -> bool {
    inlet.port() == self.generation.get()
  }
}

impl<T: 'static> InletHandler<T> for SwitcherCore<T> {
  fn on_data(&self, inlet: &Inlet<T>, item: T) {
    if !self.is_current(inlet) {
      return;
    }
    if let Some(output) = self.output.upgrade() {
      self.delivering.set(true);
      output.send(item);
      self.delivering.set(false);
    }
  }

  fn on_end_of_stream(&self, inlet: &Inlet<T>) {
    if let Some(output) = self.output.upgrade().filter(|_| self.is_current(inlet)) {
      output.send_end_of_stream();
    }
  }

  fn on_error(&self, inlet: &Inlet<T>, error: &StreamError) {
    if let Some(output) = self.output.upgrade().filter(|_| self.is_current(inlet)) {
      output.close_with_error(error.clone());
    }
  }
}

impl<T: 'static> OutletHandler<T> for SwitcherCore<T> {
  fn on_started(&self, _outlet: &Outlet<T>) {
    self.started.set(true);
    let pending = self.pending.borrow_mut().take();
    if let Some(producer) = pending {
      self.apply(producer);
    }
  }

  fn on_suspended(&self, _outlet: &Outlet<T>) {
    if let Some(current) = self.current() {
      current.suspend_upstream();
    }
  }

  fn on_resumed(&self, _outlet: &Outlet<T>) {
    if let Some(current) = self.current() {
      current.resume_upstream();
    }
  }

  fn on_closed(&self, _outlet: &Outlet<T>) {
    let pending = self.pending.borrow_mut().take();
    if let Some(producer) = pending {
      producer.close();
    }
    if let Some(current) = self.current() {
      current.close_upstream();
    }
  }

  fn on_closed_with_error(&self, _outlet: &Outlet<T>, error: &StreamError) {
    let pending = self.pending.borrow_mut().take();
    if let Some(producer) = pending {
      producer.close_with_error(error.clone());
    }
    if let Some(current) = self.current() {
      current.close_upstream_with_error(error.clone());
    }
  }
}
