use alloc::{rc::Rc, vec::Vec};
use core::cell::RefCell;

use super::Inlet;
use crate::core::{
  Eventloop, StreamError,
  lifecycle::StreamStatus,
  stage::{InletHandler, Outlet, StreamConsumer, StreamProducer},
};

#[derive(Default)]
struct Events {
  log: RefCell<Vec<&'static str>>,
}

impl InletHandler<u8> for Events {
  fn on_upstream_bound(&self, _inlet: &Inlet<u8>) {
    self.log.borrow_mut().push("bound");
  }

  fn on_data(&self, _inlet: &Inlet<u8>, _item: u8) {
    self.log.borrow_mut().push("data");
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<u8>) {
    self.log.borrow_mut().push("eos");
  }

  fn on_error(&self, _inlet: &Inlet<u8>, _error: &StreamError) {
    self.log.borrow_mut().push("error");
  }
}

#[test]
fn end_of_stream_is_acknowledged_by_closing_upstream() {
  let eventloop = Eventloop::new();
  let events = Rc::new(Events::default());
  let inlet = Inlet::<u8>::with_handler(&eventloop, 0, events.clone());
  let outlet = Outlet::<u8>::new(&eventloop, 0);
  outlet.stream_to(inlet.clone());
  outlet.send(1);
  outlet.send_end_of_stream();
  assert_eq!(*events.log.borrow(), vec!["bound", "data", "eos"]);
  assert_eq!(inlet.status(), StreamStatus::Closed);
  assert_eq!(outlet.status(), StreamStatus::Closed);
  assert!(inlet.upstream().is_none());
}

#[test]
fn consumer_failure_closes_upstream_with_same_error() {
  let eventloop = Eventloop::new();
  let events = Rc::new(Events::default());
  let inlet = Inlet::<u8>::with_handler(&eventloop, 0, events.clone());
  let outlet = Outlet::<u8>::new(&eventloop, 0);
  outlet.stream_to(inlet.clone());
  inlet.on_error(StreamError::failed("sink full"));
  assert_eq!(outlet.status(), StreamStatus::ClosedWithError);
  assert_eq!(outlet.error(), Some(StreamError::failed("sink full")));
  assert_eq!(*events.log.borrow(), vec!["bound", "error"]);
}

#[test]
fn suspension_requested_before_binding_is_replayed() {
  let eventloop = Eventloop::new();
  let inlet = Inlet::<u8>::new(&eventloop, 0);
  inlet.suspend_upstream();
  let outlet = Outlet::<u8>::new(&eventloop, 0);
  outlet.stream_to(inlet.clone());
  assert_eq!(outlet.status(), StreamStatus::Suspended);
  inlet.resume_upstream();
  assert_eq!(outlet.status(), StreamStatus::Ready);
}

#[test]
fn close_requested_before_binding_is_replayed() {
  let eventloop = Eventloop::new();
  let inlet = Inlet::<u8>::new(&eventloop, 0);
  inlet.close_upstream_with_error(StreamError::Cancelled);
  let outlet = Outlet::<u8>::new(&eventloop, 0);
  outlet.stream_to(inlet.clone());
  assert_eq!(outlet.status(), StreamStatus::ClosedWithError);
  assert_eq!(outlet.error(), Some(StreamError::Cancelled));
  assert!(inlet.upstream().is_none());
  eventloop.run();
}

#[test]
fn terminal_inlet_ignores_late_notifications() {
  let eventloop = Eventloop::new();
  let events = Rc::new(Events::default());
  let inlet = Inlet::<u8>::with_handler(&eventloop, 0, events.clone());
  inlet.close_upstream();
  inlet.on_end_of_stream();
  inlet.on_error(StreamError::Timeout);
  assert_eq!(inlet.status(), StreamStatus::Closed);
  assert!(events.log.borrow().is_empty());
}

fn bound_pair(eventloop: &Eventloop) -> (Rc<Outlet<u8>>, Rc<Inlet<u8>>) {
  let outlet = Outlet::<u8>::new(eventloop, 0);
  let inlet = Inlet::<u8>::new(eventloop, 0);
  outlet.stream_to(inlet.clone());
  (outlet, inlet)
}

fn assert_statuses(outlet: &Outlet<u8>, inlet: &Inlet<u8>, expected: StreamStatus) {
  assert_eq!(outlet.status(), expected);
  assert_eq!(inlet.status(), expected);
}

#[test]
fn every_endpoint_transition_is_a_valid_status_move() {
  let eventloop = Eventloop::new();

  let (outlet, inlet) = bound_pair(&eventloop);
  inlet.suspend_upstream();
  inlet.suspend_upstream();
  assert_statuses(&outlet, &inlet, StreamStatus::Suspended);
  inlet.resume_upstream();
  inlet.resume_upstream();
  assert_statuses(&outlet, &inlet, StreamStatus::Ready);
  inlet.suspend_upstream();
  outlet.send_end_of_stream();
  assert_statuses(&outlet, &inlet, StreamStatus::Closed);
  inlet.close_upstream();
  inlet.close_upstream_with_error(StreamError::Cancelled);
  outlet.close();
  outlet.close_with_error(StreamError::Cancelled);
  assert_statuses(&outlet, &inlet, StreamStatus::Closed);

  let (outlet, inlet) = bound_pair(&eventloop);
  inlet.close_upstream();
  assert_statuses(&outlet, &inlet, StreamStatus::Closed);

  let (outlet, inlet) = bound_pair(&eventloop);
  inlet.suspend_upstream();
  outlet.close();
  assert_statuses(&outlet, &inlet, StreamStatus::Closed);

  let (outlet, inlet) = bound_pair(&eventloop);
  inlet.suspend_upstream();
  inlet.close_upstream_with_error(StreamError::failed("consumer"));
  assert_statuses(&outlet, &inlet, StreamStatus::ClosedWithError);

  let (outlet, inlet) = bound_pair(&eventloop);
  outlet.close_with_error(StreamError::failed("producer"));
  assert_statuses(&outlet, &inlet, StreamStatus::ClosedWithError);
  assert_eq!(inlet.error(), Some(StreamError::failed("producer")));
  outlet.close();
  inlet.close_upstream();
  assert_statuses(&outlet, &inlet, StreamStatus::ClosedWithError);

  eventloop.run();
}
