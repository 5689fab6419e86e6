use alloc::{rc::Rc, vec::Vec};
use core::{cell::RefCell, time::Duration};

use super::CompletionCallback;
use crate::core::{Eventloop, StreamError};

fn recording() -> (CompletionCallback, Rc<RefCell<Vec<Result<(), StreamError>>>>) {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let sink = seen.clone();
  (CompletionCallback::new(move |result| sink.borrow_mut().push(result)), seen)
}

#[test]
fn callback_receives_outcome() {
  let (callback, seen) = recording();
  callback.on_error(StreamError::failed("boom"));
  assert_eq!(*seen.borrow(), vec![Err(StreamError::failed("boom"))]);
}

#[test]
fn timeout_fires_when_completion_is_late() {
  let eventloop = Eventloop::new();
  let (callback, seen) = recording();
  let guarded = callback.with_timeout(&eventloop, Duration::from_millis(100));
  eventloop.run();
  assert_eq!(*seen.borrow(), vec![Err(StreamError::Timeout)]);
  guarded.on_complete();
  assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn completion_before_deadline_cancels_timer() {
  let eventloop = Eventloop::new();
  let (callback, seen) = recording();
  let guarded = callback.with_timeout(&eventloop, Duration::from_millis(100));
  let clock = eventloop.clone();
  eventloop.schedule(Duration::from_millis(10), move || {
    assert_eq!(clock.current_time_millis(), 10);
    guarded.on_complete();
  });
  eventloop.run();
  assert_eq!(*seen.borrow(), vec![Ok(())]);
  assert_eq!(eventloop.current_time_millis(), 10);
}
