//! Fan-in of any number of inputs.

use alloc::{
  rc::{Rc, Weak},
  vec::Vec,
};
use core::cell::{Cell, RefCell};

use crate::core::{
  Eventloop, StreamError,
  stage::{Inlet, InletHandler, Outlet, OutletHandler, StreamConsumer, StreamProducer},
};


/// Forwards items from every input to one output as they arrive.
///
/// Each input keeps its own order; there is no ordering across inputs. The output ends once all
/// inputs ended. An input error fails the output and the remaining inputs. Closing the output
/// closes every open input with [`StreamError::Cancelled`], and an output error is passed to them.
pub struct StreamUnion<T> {
  output: Rc<Outlet<T>>,
  core:   Rc<UnionCore<T>>,
}

struct UnionCore<T> {
  this:      Weak<UnionCore<T>>,
  eventloop: Eventloop,
  output:    Weak<Outlet<T>>,
  inputs:    RefCell<Vec<Rc<Inlet<T>>>>,
  started:   Cell<bool>,
}

impl<T: 'static> StreamUnion<T> {
  /// Creates a union without inputs.
  #[must_use]
  pub fn new(eventloop: &Eventloop) -> Self {
    let output = Outlet::new(eventloop, 0);
    let core = Rc::new_cyclic(|this| UnionCore {
      this:      this.clone(),
      eventloop: eventloop.clone(),
      output:    Rc::downgrade(&output),
      inputs:    RefCell::new(Vec::new()),
      started:   Cell::new(false),
    });
    output.set_handler(core.clone());
    Self { output, core }
  }

  /// Adds an input. It stays suspended until the output runs.
  pub fn new_input(&self) -> Rc<Inlet<T>> {
    self.core.new_input()
  }

  /// Returns the merged output.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<T>> {
    self.output.clone()
  }
}

impl<T: 'static> UnionCore<T> {
  fn new_input(&self) -> Rc<Inlet<T>> {
    let port = self.inputs.borrow().len();
    let inlet = Inlet::new(&self.eventloop, port);
    if let Some(this) = self.this.upgrade() {
      inlet.set_handler(this);
    }
    let running = self.started.get() && self.output.upgrade().is_some_and(|output| output.is_ready());
    if !running {
      inlet.suspend_upstream();
    }
    self.inputs.borrow_mut().push(inlet.clone());
    inlet
  }

  fn inputs(&self) -> Vec<Rc<Inlet<T>>> {
    self.inputs.borrow().clone()
  }

  fn end_if_drained(&self) {
    let drained = self.inputs.borrow().iter().all(|input| input.status().is_terminal());
    if let Some(output) = self.output.upgrade().filter(|output| drained && output.status().is_active()) {
      output.send_end_of_stream();
    }
  }
}

impl<T: 'static> InletHandler<T> for UnionCore<T> {
  fn on_data(&self, inlet: &Inlet<T>, item: T) {
    match self.output.upgrade() {
      | Some(output) if output.status().is_active() => output.send(item),
      | _ => tracing::warn!(port = inlet.port(), "dropping item after union output terminated"),
    }
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<T>) {
    self.end_if_drained();
  }

  fn on_error(&self, inlet: &Inlet<T>, error: &StreamError) {
    tracing::debug!(port = inlet.port(), %error, "union input failed");
    if let Some(output) = self.output.upgrade() {
      output.close_with_error(error.clone());
    }
  }
}

impl<T: 'static> OutletHandler<T> for UnionCore<T> {
  fn on_started(&self, outlet: &Outlet<T>) {
    self.started.set(true);
    if self.inputs.borrow().is_empty() {
      outlet.send_end_of_stream();
      return;
    }
    if outlet.is_ready() {
      for input in self.inputs() {
        input.resume_upstream();
      }
    }
  }

  fn on_suspended(&self, _outlet: &Outlet<T>) {
    for input in self.inputs() {
      input.suspend_upstream();
    }
  }

  fn on_resumed(&self, _outlet: &Outlet<T>) {
    for input in self.inputs() {
      input.resume_upstream();
    }
  }

  fn on_closed(&self, _outlet: &Outlet<T>) {
    tracing::debug!("union output closed, cancelling inputs");
    for input in self.inputs() {
      input.close_upstream_with_error(StreamError::Cancelled);
    }
  }

  fn on_closed_with_error(&self, _outlet: &Outlet<T>, error: &StreamError) {
    for input in self.inputs() {
      input.close_upstream_with_error(error.clone());
    }
  }
}
