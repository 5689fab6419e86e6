//! Key-based fan-out.

use alloc::{
  boxed::Box,
  rc::{Rc, Weak},
  vec::Vec,
};
use core::cell::{Cell, RefCell};

use crate::core::{
  Eventloop, StreamError,
  stage::{Inlet, InletHandler, Outlet, OutletHandler, StreamProducer},
};


/// Routes every input item to output `shard(item) % outputs`.
///
/// One upstream feeds all outputs, so it only runs while every output is started and ready: any
/// suspended output suspends the input. End-of-stream is broadcast. Closing one output closes the
/// input and cancels the other outputs; an error on one output fails the input and all others.
pub struct StreamSharder<T> {
  input: Rc<Inlet<T>>,
  core:  Rc<SharderCore<T>>,
}

struct ShardOutput<T> {
  outlet:  Rc<Outlet<T>>,
  started: Cell<bool>,
}

struct SharderCore<T> {
  this:          Weak<SharderCore<T>>,
  eventloop:     Eventloop,
  input:         Weak<Inlet<T>>,
  outputs:       RefCell<Vec<Rc<ShardOutput<T>>>>,
  shard:         Box<dyn Fn(&T) -> usize>,
  shutting_down: Cell<bool>,
}

impl<T: 'static> StreamSharder<T> {
  /// Creates a sharder without outputs.
  #[must_use]
  pub fn new<F>(eventloop: &Eventloop, shard: F) -> Self
  where
    F: Fn(&T) -> usize + 'static, {
    let input = Inlet::new(eventloop, 0);
    let core = Rc::new_cyclic(|this| SharderCore {
      this:          this.clone(),
      eventloop:     eventloop.clone(),
      input:         Rc::downgrade(&input),
      outputs:       RefCell::new(Vec::new()),
      shard:         Box::new(shard),
      shutting_down: Cell::new(false),
    });
    input.set_handler(core.clone());
    input.suspend_upstream();
    Self { input, core }
  }

  /// Adds an output. Outputs must be added before the stream starts.
  pub fn new_output(&self) -> Rc<Outlet<T>> {
    self.core.new_output()
  }

  /// Returns the input.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<T>> {
    self.input.clone()
  }

  /// Returns the number of outputs.
  #[must_use]
  pub fn output_count(&self) -> usize {
    self.core.outputs.borrow().len()
  }
}

impl<T: 'static> SharderCore<T> {
  fn new_output(&self) -> Rc<Outlet<T>> {
    let port = self.outputs.borrow().len();
    let outlet = Outlet::new(&self.eventloop, port);
    if let Some(this) = self.this.upgrade() {
      outlet.set_handler(this);
    }
    self.outputs.borrow_mut().push(Rc::new(ShardOutput { outlet: outlet.clone(), started: Cell::new(false) }));
    outlet
  }

  fn outputs(&self) -> Vec<Rc<ShardOutput<T>>> {
    self.outputs.borrow().clone()
  }

  fn output(&self, port: usize) -> Option<Rc<ShardOutput<T>>> {
    self.outputs.borrow().get(port).cloned()
  }

  fn sync_upstream(&self) {
    let Some(input) = self.input.upgrade() else {
      return;
    };
    let outputs = self.outputs.borrow();
    let runnable = !outputs.is_empty() && outputs.iter().all(|output| output.started.get() && output.outlet.is_ready());
    drop(outputs);
    if runnable {
      input.resume_upstream();
    } else {
      input.suspend_upstream();
    }
  }

  fn shut_down(&self, closed_port: usize, error: Option<&StreamError>) {
    if self.shutting_down.replace(true) {
      return;
    }
    tracing::debug!(port = closed_port, failed = error.is_some(), "shard output closed, shutting down sharder");
    if let Some(input) = self.input.upgrade() {
      match error {
        | Some(error) => input.close_upstream_with_error(error.clone()),
        | None => input.close_upstream(),
      }
    }
    let sibling_error = error.cloned().unwrap_or(StreamError::Cancelled);
    for output in self.outputs().into_iter().filter(|output| output.outlet.port() != closed_port) {
      output.outlet.close_with_error(sibling_error.clone());
    }
  }
}

impl<T: 'static> InletHandler<T> for SharderCore<T> {
  fn on_data(&self, _inlet: &Inlet<T>, item: T) {
    let count = self.outputs.borrow().len();
    if count == 0 {
      tracing::warn!("dropping item routed to a sharder without outputs");
      return;
    }
    let port = (self.shard)(&item) % count;
    match self.output(port) {
      | Some(output) if output.outlet.status().is_active() => output.outlet.send(item),
      | _ => tracing::warn!(port, "dropping item routed to a terminated shard"),
    }
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<T>) {
    for output in self.outputs() {
      output.outlet.send_end_of_stream();
    }
  }

  fn on_error(&self, _inlet: &Inlet<T>, error: &StreamError) {
    self.shutting_down.set(true);
    for output in self.outputs() {
      output.outlet.close_with_error(error.clone());
    }
  }
}

impl<T: 'static> OutletHandler<T> for SharderCore<T> {
  fn on_started(&self, outlet: &Outlet<T>) {
    if let Some(output) = self.output(outlet.port()) {
      output.started.set(true);
    }
    self.sync_upstream();
  }

  fn on_suspended(&self, _outlet: &Outlet<T>) {
    if let Some(input) = self.input.upgrade() {
      input.suspend_upstream();
    }
  }

  fn on_resumed(&self, _outlet: &Outlet<T>) {
    self.sync_upstream();
  }

  fn on_closed(&self, outlet: &Outlet<T>) {
    self.shut_down(outlet.port(), None);
  }

  fn on_closed_with_error(&self, outlet: &Outlet<T>, error: &StreamError) {
    self.shut_down(outlet.port(), Some(error));
  }
}
