use alloc::{rc::Rc, vec::Vec};
use core::{cell::RefCell, time::Duration};

use super::Eventloop;

#[test]
fn posted_tasks_run_in_fifo_order() {
  let eventloop = Eventloop::new();
  let log = Rc::new(RefCell::new(Vec::new()));
  for value in 0..3 {
    let log = log.clone();
    eventloop.post(move || log.borrow_mut().push(value));
  }
  assert_eq!(eventloop.pending_tasks(), 3);
  assert_eq!(eventloop.run(), 3);
  assert_eq!(*log.borrow(), vec![0, 1, 2]);
}

#[test]
fn tasks_posted_while_running_are_drained() {
  let eventloop = Eventloop::new();
  let log = Rc::new(RefCell::new(Vec::new()));
  let inner_loop = eventloop.clone();
  let inner_log = log.clone();
  eventloop.post(move || {
    inner_log.borrow_mut().push("outer");
    let nested_log = inner_log.clone();
    inner_loop.post(move || nested_log.borrow_mut().push("nested"));
  });
  eventloop.run_until_idle();
  assert_eq!(*log.borrow(), vec!["outer", "nested"]);
}

#[test]
fn timers_advance_virtual_clock_in_deadline_order() {
  let eventloop = Eventloop::new();
  let log = Rc::new(RefCell::new(Vec::new()));
  for (delay, label) in [(30_u64, "c"), (10, "a"), (20, "b"), (10, "a2")] {
    let log = log.clone();
    let clock = eventloop.clone();
    eventloop.schedule(Duration::from_millis(delay), move || {
      log.borrow_mut().push((label, clock.current_time_millis()));
    });
  }
  assert_eq!(eventloop.pending_timers(), 4);
  eventloop.run();
  assert_eq!(*log.borrow(), vec![("a", 10), ("a2", 10), ("b", 20), ("c", 30)]);
  assert_eq!(eventloop.current_time_millis(), 30);
}

#[test]
fn cancelled_timer_never_runs() {
  let eventloop = Eventloop::new();
  let fired = Rc::new(RefCell::new(false));
  let flag = fired.clone();
  let handle = eventloop.schedule(Duration::from_millis(5), move || *flag.borrow_mut() = true);
  assert!(handle.cancel());
  assert!(!handle.cancel());
  eventloop.run();
  assert!(!*fired.borrow());
  assert!(handle.is_cancelled());
  assert!(!handle.is_complete());
  assert_eq!(eventloop.current_time_millis(), 0);
}

#[test]
fn run_until_idle_leaves_timers_pending() {
  let eventloop = Eventloop::new();
  let handle = eventloop.schedule(Duration::from_millis(1), || {});
  eventloop.run_until_idle();
  assert!(!handle.is_complete());
  eventloop.run();
  assert!(handle.is_complete());
}
