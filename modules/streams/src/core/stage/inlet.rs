//! Base consumer endpoint.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use super::{DataReceiver, InletHandler, ProducerRef, StreamConsumer};
use crate::core::{
  Eventloop, StreamError,
  lifecycle::{CompletionCallback, CompletionListeners, StreamStatus},
};

#[cfg(test)]
mod tests;

struct InletState<T> {
  status:    StreamStatus,
  error:     Option<StreamError>,
  upstream:  Option<ProducerRef<T>>,
  listeners: CompletionListeners,
}

/// Consumer endpoint with status tracking and upstream control.
///
/// Items and upstream events are dispatched to an [`InletHandler`]. End-of-stream is acknowledged
/// by closing the upstream after the handler ran, so a producer that finished normally ends
/// `Closed`. A suspend or close requested before any upstream was bound is replayed onto the
/// producer that binds later.
pub struct Inlet<T> {
  this:      Weak<Inlet<T>>,
  eventloop: Eventloop,
  port:      usize,
  handler:   RefCell<Option<Rc<dyn InletHandler<T>>>>,
  state:     RefCell<InletState<T>>,
}

impl<T: 'static> Inlet<T> {
  /// Creates a ready inlet without a handler; items reaching it are discarded.
  #[must_use]
  pub fn new(eventloop: &Eventloop, port: usize) -> Rc<Self> {
    Rc::new_cyclic(|this| Self {
      this: this.clone(),
      eventloop: eventloop.clone(),
      port,
      handler: RefCell::new(None),
      state: RefCell::new(InletState {
        status:    StreamStatus::Ready,
        error:     None,
        upstream:  None,
        listeners: CompletionListeners::new(),
      }),
    })
  }

  /// Creates a ready inlet dispatching to `handler`.
  #[must_use]
  pub fn with_handler(eventloop: &Eventloop, port: usize, handler: Rc<dyn InletHandler<T>>) -> Rc<Self> {
    let inlet = Self::new(eventloop, port);
    inlet.set_handler(handler);
    inlet
  }

  /// Installs the handler. Ignored once the inlet is final.
  pub fn set_handler(&self, handler: Rc<dyn InletHandler<T>>) {
    if !self.status().is_final() {
      *self.handler.borrow_mut() = Some(handler);
    }
  }

  /// Returns a shared handle to this inlet.
  #[must_use]
  pub fn shared(&self) -> Option<Rc<Self>> {
    self.this.upgrade()
  }

  /// Returns the port index given at construction.
  #[must_use]
  pub const fn port(&self) -> usize {
    self.port
  }

  /// Returns the event loop the inlet runs on.
  #[must_use]
  pub const fn eventloop(&self) -> &Eventloop {
    &self.eventloop
  }

  /// Returns the status of the bound upstream, if any.
  #[must_use]
  pub fn upstream_status(&self) -> Option<StreamStatus> {
    let upstream = self.state.borrow().upstream.clone();
    upstream.map(|upstream| upstream.status())
  }

  /// Suspends the upstream producer.
  pub fn suspend_upstream(&self) {
    let upstream = {
      let mut state = self.state.borrow_mut();
      if !state.status.is_active() {
        return;
      }
      if state.status != StreamStatus::Suspended {
        state.status.transition(StreamStatus::Suspended);
      }
      state.upstream.clone()
    };
    if let Some(upstream) = upstream {
      upstream.suspend();
    }
  }

  /// Resumes the upstream producer.
  pub fn resume_upstream(&self) {
    let upstream = {
      let mut state = self.state.borrow_mut();
      if !state.status.is_active() {
        return;
      }
      if state.status != StreamStatus::Ready {
        state.status.transition(StreamStatus::Ready);
      }
      state.upstream.clone()
    };
    if let Some(upstream) = upstream {
      upstream.resume();
    }
  }

  /// Closes the link from the consumer side.
  pub fn close_upstream(&self) {
    let outcome = Ok(());
    let (callbacks, upstream) = {
      let mut state = self.state.borrow_mut();
      if state.status.is_final() {
        return;
      }
      state.status.transition(StreamStatus::Closed);
      (state.listeners.resolve(&outcome), state.upstream.take())
    };
    tracing::trace!(port = self.port, "consumer closed upstream");
    if let Some(upstream) = upstream {
      upstream.close();
    }
    CompletionListeners::notify(callbacks, &outcome);
    self.release();
  }

  /// Closes the link from the consumer side with `error`.
  pub fn close_upstream_with_error(&self, error: StreamError) {
    let outcome = Err(error.clone());
    let (callbacks, upstream) = {
      let mut state = self.state.borrow_mut();
      if state.status.is_terminal() {
        return;
      }
      state.status.transition(StreamStatus::ClosedWithError);
      state.error = Some(error.clone());
      (state.listeners.resolve(&outcome), state.upstream.take())
    };
    tracing::debug!(port = self.port, %error, "consumer closed upstream with error");
    if let Some(upstream) = upstream {
      upstream.close_with_error(error);
    }
    CompletionListeners::notify(callbacks, &outcome);
    self.release();
  }

  fn handler(&self) -> Option<Rc<dyn InletHandler<T>>> {
    self.handler.borrow().clone()
  }

  fn deliver(&self, item: T) {
    let status = self.status();
    debug_assert!(!status.is_terminal(), "item delivered to a consumer that is {status}");
    if status.is_terminal() {
      tracing::warn!(port = self.port, %status, "dropping item delivered after termination");
      return;
    }
    match self.handler() {
      | Some(handler) => handler.on_data(self, item),
      | None => tracing::trace!(port = self.port, "item discarded by inlet without handler"),
    }
  }

  fn release(&self) {
    let handler = self.handler.borrow_mut().take();
    let upstream = self.state.borrow_mut().upstream.take();
    drop((handler, upstream));
  }
}

impl<T: 'static> StreamConsumer<T> for Inlet<T> {
  fn data_receiver(&self) -> DataReceiver<T> {
    let this = self.this.clone();
    DataReceiver::new(move |item| {
      if let Some(inlet) = this.upgrade() {
        inlet.deliver(item);
      }
    })
  }

  fn set_upstream(&self, producer: Option<ProducerRef<T>>) -> Option<ProducerRef<T>> {
    let (previous, status, error) = {
      let mut state = self.state.borrow_mut();
      let previous = core::mem::replace(&mut state.upstream, producer.clone());
      (previous, state.status, state.error.clone())
    };
    let Some(producer) = producer else {
      return previous;
    };
    match status {
      | StreamStatus::Suspended => producer.suspend(),
      | StreamStatus::Closed => producer.close(),
      | StreamStatus::ClosedWithError => producer.close_with_error(error.unwrap_or(StreamError::Cancelled)),
      | StreamStatus::Ready | StreamStatus::EndOfStream => {},
    }
    if status.is_final() {
      self.state.borrow_mut().upstream = None;
    } else if let Some(handler) = self.handler() {
      handler.on_upstream_bound(self);
    }
    previous
  }

  fn upstream(&self) -> Option<ProducerRef<T>> {
    self.state.borrow().upstream.clone()
  }

  fn on_end_of_stream(&self) {
    {
      let mut state = self.state.borrow_mut();
      if state.status.is_terminal() {
        return;
      }
      state.status.transition(StreamStatus::EndOfStream);
    }
    tracing::trace!(port = self.port, "end of stream received");
    if let Some(handler) = self.handler() {
      handler.on_end_of_stream(self);
    }
    let outcome = Ok(());
    let (callbacks, upstream) = {
      let mut state = self.state.borrow_mut();
      if state.status != StreamStatus::EndOfStream {
        return;
      }
      state.status.transition(StreamStatus::Closed);
      (state.listeners.resolve(&outcome), state.upstream.take())
    };
    if let Some(upstream) = upstream {
      upstream.close();
    }
    CompletionListeners::notify(callbacks, &outcome);
    self.release();
  }

  fn on_error(&self, error: StreamError) {
    let outcome = Err(error.clone());
    let (callbacks, upstream) = {
      let mut state = self.state.borrow_mut();
      if state.status.is_terminal() {
        return;
      }
      state.status.transition(StreamStatus::ClosedWithError);
      state.error = Some(error.clone());
      (state.listeners.resolve(&outcome), state.upstream.take())
    };
    tracing::debug!(port = self.port, %error, "consumer failed");
    if let Some(handler) = self.handler() {
      handler.on_error(self, &error);
    }
    if let Some(upstream) = upstream {
      upstream.close_with_error(error);
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
