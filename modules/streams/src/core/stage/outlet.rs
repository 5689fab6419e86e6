//! Base producer endpoint.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use super::{ConsumerRef, DataReceiver, OutletHandler, ProduceOutcome, ProducerRef, StreamProducer, same_endpoint};
use crate::core::{
  Eventloop, StreamError,
  lifecycle::{CompletionCallback, CompletionListeners, StreamStatus},
};


struct OutletState<T> {
  status:         StreamStatus,
  error:          Option<StreamError>,
  downstream:     Option<ConsumerRef<T>>,
  receiver:       Option<DataReceiver<T>>,
  listeners:      CompletionListeners,
  started:        bool,
  produce_posted: bool,
}

/// Producer endpoint with status tracking, listener bookkeeping and a produce driver.
///
/// Owners plug in behaviour through an [`OutletHandler`]. The outlet drops its handler and its
/// downstream once it reaches a final status.
pub struct Outlet<T> {
  this:      Weak<Outlet<T>>,
  eventloop: Eventloop,
  port:      usize,
  handler:   RefCell<Option<Rc<dyn OutletHandler<T>>>>,
  state:     RefCell<OutletState<T>>,
}

impl<T: 'static> Outlet<T> {
  /// Creates a ready outlet without a handler.
  #[must_use]
  pub fn new(eventloop: &Eventloop, port: usize) -> Rc<Self> {
    Rc::new_cyclic(|this| Self {
      this: this.clone(),
      eventloop: eventloop.clone(),
      port,
      handler: RefCell::new(None),
      state: RefCell::new(OutletState {
        status:         StreamStatus::Ready,
        error:          None,
        downstream:     None,
        receiver:       None,
        listeners:      CompletionListeners::new(),
        started:        false,
        produce_posted: false,
      }),
    })
  }

  /// Creates a ready outlet driven by `handler`.
  #[must_use]
  pub fn with_handler(eventloop: &Eventloop, port: usize, handler: Rc<dyn OutletHandler<T>>) -> Rc<Self> {
    let outlet = Self::new(eventloop, port);
    outlet.set_handler(handler);
    outlet
  }

  /// Installs the handler. Ignored once the outlet is final.
  pub fn set_handler(&self, handler: Rc<dyn OutletHandler<T>>) {
    if !self.status().is_final() {
      *self.handler.borrow_mut() = Some(handler);
    }
  }

  /// Returns a shared handle to this outlet.
  #[must_use]
  pub fn shared(&self) -> Option<Rc<Self>> {
    self.this.upgrade()
  }

  /// Returns the port index given at construction.
  #[must_use]
  pub const fn port(&self) -> usize {
    self.port
  }

  /// Returns the event loop the outlet runs on.
  #[must_use]
  pub const fn eventloop(&self) -> &Eventloop {
    &self.eventloop
  }

  /// Returns `true` while the outlet may push items.
  #[must_use]
  pub fn is_ready(&self) -> bool {
    self.status() == StreamStatus::Ready
  }

  /// Pushes one item into the bound consumer.
  ///
  /// Items pushed while suspended are still delivered; the producer is expected to stop at the
  /// next status check.
  pub fn send(&self, item: T) {
    let (status, receiver) = {
      let state = self.state.borrow();
      (state.status, state.receiver.clone())
    };
    debug_assert!(status.is_active(), "item sent by a producer that is {status}");
    if !status.is_active() {
      tracing::warn!(port = self.port, %status, "dropping item sent after termination");
      return;
    }
    match receiver {
      | Some(receiver) => receiver.on_data(item),
      | None => tracing::warn!(port = self.port, "dropping item sent without a bound consumer"),
    }
  }

  /// Marks the end of the stream and notifies the consumer.
  pub fn send_end_of_stream(&self) {
    let outcome = Ok(());
    let (callbacks, downstream) = {
      let mut state = self.state.borrow_mut();
      if !state.status.is_active() {
        debug_assert_ne!(state.status, StreamStatus::EndOfStream, "end of stream sent twice");
        tracing::trace!(port = self.port, status = %state.status, "end of stream after termination ignored");
        return;
      }
      state.status.transition(StreamStatus::EndOfStream);
      (state.listeners.resolve(&outcome), state.downstream.clone())
    };
    tracing::trace!(port = self.port, "end of stream");
    if let Some(downstream) = downstream {
      downstream.on_end_of_stream();
    }
    CompletionListeners::notify(callbacks, &outcome);
  }

  /// Drives [`OutletHandler::do_produce`] while the outlet stays ready.
  pub fn produce(&self) {
    let Some(handler) = self.handler() else {
      return;
    };
    while self.is_ready() {
      match handler.do_produce(self) {
        | Ok(ProduceOutcome::Continue) => {},
        | Ok(ProduceOutcome::Yield) => return,
        | Ok(ProduceOutcome::Exhausted) => {
          self.send_end_of_stream();
          return;
        },
        | Err(error) => {
          self.close_with_error(error);
          return;
        },
      }
    }
  }

  /// Schedules one [`Outlet::produce`] pass on the event loop.
  ///
  /// Repeated calls before the pass runs are coalesced.
  pub fn resume_produce(&self) {
    let Some(this) = self.this.upgrade() else {
      return;
    };
    {
      let mut state = self.state.borrow_mut();
      if state.produce_posted {
        return;
      }
      state.produce_posted = true;
    }
    self.eventloop.post(move || {
      this.state.borrow_mut().produce_posted = false;
      this.produce();
    });
  }

  fn handler(&self) -> Option<Rc<dyn OutletHandler<T>>> {
    self.handler.borrow().clone()
  }

  fn as_producer(&self) -> Option<ProducerRef<T>> {
    self.this.upgrade().map(|outlet| outlet as ProducerRef<T>)
  }

  fn post_start(&self) {
    let Some(this) = self.this.upgrade() else {
      return;
    };
    if core::mem::replace(&mut self.state.borrow_mut().started, true) {
      return;
    }
    self.eventloop.post(move || this.start());
  }

  fn start(&self) {
    if self.status().is_terminal() {
      return;
    }
    tracing::trace!(port = self.port, "producer started");
    if let Some(handler) = self.handler() {
      handler.on_started(self);
    }
  }

  fn release(&self) {
    let handler = self.handler.borrow_mut().take();
    let (downstream, receiver) = {
      let mut state = self.state.borrow_mut();
      (state.downstream.take(), state.receiver.take())
    };
    drop((handler, downstream, receiver));
  }
}

impl<T: 'static> StreamProducer<T> for Outlet<T> {
  fn stream_to(&self, consumer: ConsumerRef<T>) {
    let Some(this) = self.as_producer() else {
      return;
    };
    let (status, current) = {
      let state = self.state.borrow();
      (state.status, state.downstream.clone())
    };
    assert!(!status.is_final(), "stream_to called on a producer that is already {status}");
    if let Some(current) = current {
      if same_endpoint(&current, &consumer) {
        return;
      }
      tracing::trace!(port = self.port, "rebinding producer to another consumer");
      if current.upstream().is_some_and(|upstream| same_endpoint(&upstream, &this)) {
        current.set_upstream(None);
      }
    }
    self.state.borrow_mut().downstream = Some(consumer.clone());
    if let Some(previous) = consumer.set_upstream(Some(this.clone())) {
      let bound_to_consumer = previous.downstream().is_some_and(|downstream| same_endpoint(&downstream, &consumer));
      if !same_endpoint(&previous, &this) && bound_to_consumer {
        previous.release_downstream();
      }
    }
    self.bind_data_receiver();
    self.post_start();
  }

  fn bind_data_receiver(&self) {
    let downstream = self.state.borrow().downstream.clone();
    let receiver = downstream.map(|downstream| downstream.data_receiver());
    self.state.borrow_mut().receiver = receiver;
  }

  fn downstream(&self) -> Option<ConsumerRef<T>> {
    self.state.borrow().downstream.clone()
  }

  fn release_downstream(&self) {
    let mut state = self.state.borrow_mut();
    state.downstream = None;
    state.receiver = None;
  }

  fn suspend(&self) {
    {
      let mut state = self.state.borrow_mut();
      if state.status != StreamStatus::Ready {
        return;
      }
      state.status.transition(StreamStatus::Suspended);
    }
    tracing::trace!(port = self.port, "producer suspended");
    if let Some(handler) = self.handler() {
      handler.on_suspended(self);
    }
  }

  fn resume(&self) {
    {
      let mut state = self.state.borrow_mut();
      if state.status != StreamStatus::Suspended {
        return;
      }
      state.status.transition(StreamStatus::Ready);
    }
    tracing::trace!(port = self.port, "producer resumed");
    self.bind_data_receiver();
    if let Some(handler) = self.handler() {
      handler.on_resumed(self);
    }
  }

  fn close(&self) {
    let outcome = Ok(());
    let (previous, callbacks, downstream) = {
      let mut state = self.state.borrow_mut();
      if state.status.is_final() {
        return;
      }
      let previous = state.status.transition(StreamStatus::Closed);
      (previous, state.listeners.resolve(&outcome), state.downstream.clone())
    };
    tracing::trace!(port = self.port, from = %previous, "producer closed");
    if previous.is_active() {
      if let Some(handler) = self.handler() {
        handler.on_closed(self);
      }
      if let Some(downstream) = downstream.filter(|downstream| downstream.status().is_active()) {
        downstream.on_end_of_stream();
      }
    }
    CompletionListeners::notify(callbacks, &outcome);
    self.release();
  }

  fn close_with_error(&self, error: StreamError) {
    let outcome = Err(error.clone());
    let (callbacks, downstream) = {
      let mut state = self.state.borrow_mut();
      if state.status.is_terminal() {
        return;
      }
      state.status.transition(StreamStatus::ClosedWithError);
      state.error = Some(error.clone());
      (state.listeners.resolve(&outcome), state.downstream.clone())
    };
    tracing::debug!(port = self.port, %error, "producer closed with error");
    if let Some(handler) = self.handler() {
      handler.on_closed_with_error(self, &error);
    }
    if let Some(downstream) = downstream.filter(|downstream| downstream.status().is_active()) {
      downstream.on_error(error);
    }
    CompletionListeners::notify(callbacks, &outcome);
    self.release();
  }

  fn status(&self) -> StreamStatus {
    self.state.borrow().status
  }

  fn error(&self) -> Option<StreamError> {
    self.state.borrow().error.clone()
  }

  fn add_completion_callback(&self, callback: CompletionCallback) {
    let immediate = self.state.borrow_mut().listeners.register(callback);
    if let Some((callback, outcome)) = immediate {
      callback.complete_with(outcome);
    }
  }
}
